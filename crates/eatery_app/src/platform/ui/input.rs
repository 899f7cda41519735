use eatery_core::{Msg, PageToken};

/// One line of interactive input, decoded.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Msg(Msg),
    /// Simulated connectivity transition; routed through the monitor.
    SetOnline(bool),
    Help,
    Quit,
}

pub const HELP: &str = "\
Commands:
  search <text>   filter by restaurant name (empty text clears the search)
  top             only restaurants rated above 4
  clear           drop search text and rating filter
  next | prev     move one page
  page <n>        jump to page n
  menu <id>       show the menu of restaurant <id>
  back            return to the listing
  reload          fetch the listing again
  online|offline  simulate a connectivity change
  help            this text
  quit            leave";

/// `Ok(None)` for blank lines, `Err` with a hint for anything unrecognised.
pub fn parse_command(line: &str) -> Result<Option<Command>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "search" | "s" => Command::Msg(Msg::SearchTextChanged(rest.to_string())),
        "top" => Command::Msg(Msg::TopRatedClicked),
        "clear" => Command::Msg(Msg::ClearFiltersClicked),
        "next" | "n" => Command::Msg(Msg::NextPageClicked),
        "prev" | "p" => Command::Msg(Msg::PreviousPageClicked),
        "page" => Command::Msg(Msg::PageSelected(parse_page(rest)?)),
        "menu" | "m" if !rest.is_empty() => Command::Msg(Msg::MenuRequested {
            restaurant_id: rest.to_string(),
        }),
        "menu" | "m" => return Err("usage: menu <restaurant id>".to_string()),
        "back" => Command::Msg(Msg::MenuClosed),
        "reload" => Command::Msg(Msg::ListingRequested),
        "online" => Command::SetOnline(true),
        "offline" => Command::SetOnline(false),
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(format!("unknown command {other:?}; type 'help'")),
    };
    Ok(Some(command))
}

fn parse_page(raw: &str) -> Result<PageToken, String> {
    match raw {
        "…" | "..." => Ok(PageToken::Ellipsis),
        _ => raw
            .parse::<usize>()
            .map(PageToken::Page)
            .map_err(|_| format!("usage: page <number>, got {raw:?}")),
    }
}
