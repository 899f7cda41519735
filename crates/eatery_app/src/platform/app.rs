use std::io::{self, BufRead, Write};
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{bail, Context};
use eatery_core::{update, AppState, ListingStatus, MenuState, Msg, PageToken};
use eatery_engine::{initial_connectivity, ConnectivityMonitor, Subscription};
use engine_logging::{engine_info, engine_warn};

use super::effects::EffectRunner;
use super::ui::input::{parse_command, Command as Input, HELP};
use super::ui::render::{render_json, render_text};
use crate::cli::{AppConfig, Command, OutputFormat};

const POLL_INTERVAL: Duration = Duration::from_millis(50);
/// Upper bound for one-shot commands; the engine always answers well before this.
const WAIT_LIMIT: Duration = Duration::from_secs(60);

pub fn run(config: AppConfig, command: Command) -> anyhow::Result<()> {
    let mut session = Session::start(&config);
    match command {
        Command::List {
            search,
            top_rated,
            page,
        } => run_list(&mut session, search, top_rated, page),
        Command::Menu { restaurant_id } => run_menu(&mut session, restaurant_id),
        Command::Browse => run_browse(&mut session),
    }
}

enum Event {
    Msg(Msg),
    Line(String),
    InputClosed,
}

/// Owns the state machine and feeds it from the engine, the connectivity
/// monitor and the terminal.
struct Session {
    state: AppState,
    effects: EffectRunner,
    monitor: ConnectivityMonitor,
    format: OutputFormat,
    event_tx: mpsc::Sender<Event>,
    event_rx: mpsc::Receiver<Event>,
    _connectivity: Subscription,
}

impl Session {
    fn start(config: &AppConfig) -> Self {
        let online = initial_connectivity(&config.engine.probe);
        let monitor = ConnectivityMonitor::new(online);
        let (state, _) = update(
            AppState::with_page_size(config.page_size),
            Msg::ConnectivityChanged { online },
        );
        let (event_tx, event_rx) = mpsc::channel();

        let connectivity_tx = event_tx.clone();
        let subscription = monitor.subscribe(move |online| {
            let _ = connectivity_tx.send(Event::Msg(Msg::ConnectivityChanged { online }));
        });

        let effects = EffectRunner::new(config.engine.clone(), monitor.clone());
        Self {
            state,
            effects,
            monitor,
            format: config.format,
            event_tx,
            event_rx,
            _connectivity: subscription,
        }
    }

    /// Runs one message through `update`; true when the view changed.
    fn dispatch(&mut self, msg: Msg) -> bool {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        self.effects.enqueue(effects);
        let dirty = state.consume_dirty();
        self.state = state;
        dirty
    }

    /// Dispatches every engine result already waiting; true when any view changed.
    fn drain_engine(&mut self) -> bool {
        let mut dirty = false;
        while let Some(msg) = self.effects.try_next() {
            dirty |= self.dispatch(msg);
        }
        dirty
    }

    /// Pumps engine and connectivity messages until `done` holds.
    fn wait_until(&mut self, done: impl Fn(&AppState) -> bool) -> anyhow::Result<()> {
        let deadline = Instant::now() + WAIT_LIMIT;
        while !done(&self.state) {
            if Instant::now() >= deadline {
                bail!("no response from the feed within {}s", WAIT_LIMIT.as_secs());
            }
            if let Some(msg) = self.effects.next_timeout(POLL_INTERVAL) {
                self.dispatch(msg);
            }
            self.drain_engine();
            while let Ok(event) = self.event_rx.try_recv() {
                if let Event::Msg(msg) = event {
                    self.dispatch(msg);
                }
            }
        }
        Ok(())
    }

    fn render(&self) -> anyhow::Result<()> {
        let view = self.state.view();
        let text = match self.format {
            OutputFormat::Text => render_text(&view),
            OutputFormat::Json => render_json(&view).context("serializing view")?,
        };
        let mut stdout = io::stdout().lock();
        writeln!(stdout, "{}", text.trim_end())?;
        stdout.flush()?;
        Ok(())
    }
}

fn listing_settled(state: &AppState) -> bool {
    matches!(state.listing_status(), ListingStatus::Ready(_))
}

fn run_list(
    session: &mut Session,
    search: Option<String>,
    top_rated: bool,
    page: usize,
) -> anyhow::Result<()> {
    session.dispatch(Msg::ListingRequested);
    session.wait_until(listing_settled)?;

    let state = std::mem::take(&mut session.state);
    let (state, rejected) = apply_list_options(state, search, top_rated, page);
    session.state = state;
    if let Some(page) = rejected {
        engine_warn!(
            "Page {} is out of range (1..={}); showing page {}",
            page,
            session.state.listing().page_count().max(1),
            session.state.listing().current_page()
        );
    }
    session.render()
}

/// Applies the `list` filters and page to a loaded listing. An unreachable
/// page leaves the current one in place and is returned.
fn apply_list_options(
    state: AppState,
    search: Option<String>,
    top_rated: bool,
    page: usize,
) -> (AppState, Option<usize>) {
    let mut messages = Vec::new();
    if let Some(search) = search {
        messages.push(Msg::SearchTextChanged(search));
    }
    if top_rated {
        messages.push(Msg::TopRatedClicked);
    }
    messages.push(Msg::PageSelected(PageToken::Page(page)));

    let state = messages
        .into_iter()
        .fold(state, |state, msg| update(state, msg).0);
    let rejected = (state.listing().current_page() != page).then_some(page);
    (state, rejected)
}

fn run_menu(session: &mut Session, restaurant_id: String) -> anyhow::Result<()> {
    if restaurant_id.trim().is_empty() {
        bail!("restaurant id must not be blank");
    }
    session.dispatch(Msg::MenuRequested { restaurant_id });
    session.wait_until(|state| !matches!(state.menu(), MenuState::Loading { .. }))?;
    session.render()
}

fn run_browse(session: &mut Session) -> anyhow::Result<()> {
    spawn_stdin_reader(session.event_tx.clone());

    session.dispatch(Msg::ListingRequested);
    session.render()?;
    prompt()?;

    loop {
        let mut dirty = session.drain_engine();
        match session.event_rx.recv_timeout(POLL_INTERVAL) {
            Ok(Event::Msg(msg)) => dirty |= session.dispatch(msg),
            Ok(Event::Line(line)) => match parse_command(&line) {
                Ok(None) => prompt()?,
                Ok(Some(Input::Msg(msg))) => {
                    if session.dispatch(msg) {
                        dirty = true;
                    } else {
                        prompt()?;
                    }
                }
                Ok(Some(Input::SetOnline(online))) => {
                    if !session.monitor.report(online) {
                        eprintln!("already {}", if online { "online" } else { "offline" });
                        prompt()?;
                    }
                }
                Ok(Some(Input::Help)) => {
                    println!("{HELP}");
                    prompt()?;
                }
                Ok(Some(Input::Quit)) => break,
                Err(hint) => {
                    eprintln!("{hint}");
                    prompt()?;
                }
            },
            Ok(Event::InputClosed) | Err(mpsc::RecvTimeoutError::Disconnected) => break,
            Err(mpsc::RecvTimeoutError::Timeout) => {}
        }
        if dirty {
            session.render()?;
            prompt()?;
        }
    }

    engine_info!("Browse session ended");
    Ok(())
}

fn spawn_stdin_reader(event_tx: mpsc::Sender<Event>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            let Ok(line) = line else { break };
            if event_tx.send(Event::Line(line)).is_err() {
                return;
            }
        }
        let _ = event_tx.send(Event::InputClosed);
    });
}

fn prompt() -> io::Result<()> {
    let mut stdout = io::stdout().lock();
    write!(stdout, "> ")?;
    stdout.flush()
}
