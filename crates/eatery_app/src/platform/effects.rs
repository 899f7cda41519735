use std::time::Duration;

use eatery_core::{Effect, Msg};
use eatery_engine::{ConnectivityMonitor, EngineConfig, EngineEvent, EngineHandle};
use engine_logging::{engine_debug, engine_warn};

/// Executes effects on the engine and turns its events back into messages.
pub struct EffectRunner {
    engine: EngineHandle,
}

impl EffectRunner {
    pub fn new(config: EngineConfig, monitor: ConnectivityMonitor) -> Self {
        Self {
            engine: EngineHandle::new(config, monitor),
        }
    }

    pub fn enqueue(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::FetchListing => {
                    engine_debug!("FetchListing");
                    self.engine.fetch_listing();
                }
                Effect::FetchMenu { ticket } => {
                    engine_debug!(
                        "FetchMenu restaurant_id={} seq={}",
                        ticket.restaurant_id,
                        ticket.seq
                    );
                    self.engine.fetch_menu(ticket);
                }
            }
        }
    }

    pub fn try_next(&self) -> Option<Msg> {
        self.engine.try_recv().map(event_to_msg)
    }

    pub fn next_timeout(&self, timeout: Duration) -> Option<Msg> {
        self.engine.recv_timeout(timeout).map(event_to_msg)
    }
}

fn event_to_msg(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::ListingLoaded {
            restaurants,
            origin,
        } => Msg::ListingLoaded {
            restaurants,
            origin,
        },
        EngineEvent::MenuLoaded { ticket, result } => match result {
            Ok(menu) => Msg::MenuLoaded { ticket, menu },
            Err(err) => {
                engine_warn!("Menu {} unavailable: {}", ticket.restaurant_id, err);
                Msg::MenuFailed {
                    ticket,
                    reason: err.to_string(),
                }
            }
        },
    }
}
