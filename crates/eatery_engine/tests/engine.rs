use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use eatery_core::{update, AppState, Effect, ListingOrigin, MenuScreen, Msg};
use eatery_engine::{
    fallback_restaurants, ConnectivityMonitor, EngineConfig, EngineEvent, EngineHandle,
    FailureKind, FeedEndpoints, FetchError, FetchMetadata, FetchOutput, Fetcher, ProbeSettings,
};
use serde_json::{json, Value};

const WAIT: Duration = Duration::from_secs(5);

/// Serves canned documents keyed by URL, each after its own delay.
struct StubFetcher {
    routes: HashMap<String, (Duration, Option<Value>)>,
}

#[async_trait::async_trait]
impl Fetcher for StubFetcher {
    async fn fetch(&self, url: &str) -> Result<FetchOutput, FetchError> {
        let Some((delay, body)) = self.routes.get(url) else {
            return Err(FetchError {
                kind: FailureKind::HttpStatus(404),
                message: url.to_string(),
            });
        };
        tokio::time::sleep(*delay).await;
        let Some(body) = body else {
            return Err(FetchError {
                kind: FailureKind::Network,
                message: "connection reset".to_string(),
            });
        };
        let bytes = serde_json::to_vec(body).unwrap();
        Ok(FetchOutput {
            metadata: FetchMetadata {
                original_url: url.to_string(),
                final_url: url.to_string(),
                redirect_count: 0,
                content_type: Some("application/json".to_string()),
                byte_len: bytes.len() as u64,
            },
            bytes,
        })
    }
}

fn config() -> EngineConfig {
    EngineConfig {
        endpoints: FeedEndpoints {
            listing_base_url: "https://feed.test/list".to_string(),
            menu_base_url: "https://feed.test/menu?id=".to_string(),
            latitude: 1.0,
            longitude: 2.0,
        },
        probe: ProbeSettings {
            enabled: false,
            ..ProbeSettings::default()
        },
        ..EngineConfig::default()
    }
}

fn engine(routes: Vec<(String, Duration, Option<Value>)>) -> EngineHandle {
    let routes = routes
        .into_iter()
        .map(|(url, delay, body)| (url, (delay, body)))
        .collect();
    EngineHandle::with_fetcher(
        config(),
        Arc::new(StubFetcher { routes }),
        ConnectivityMonitor::new(true),
    )
}

fn menu_doc(name: &str) -> Value {
    json!({ "data": { "cards": [ { "card": { "card": { "info": { "name": name } } } } ] } })
}

fn to_msg(event: EngineEvent) -> Msg {
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
            Err(err) => Msg::MenuFailed {
                ticket,
                reason: err.to_string(),
            },
        },
    }
}

#[test]
fn failed_listing_falls_back_to_bundled_data() {
    engine_logging::initialize_for_tests();
    let listing_url = config().endpoints.listing_url().unwrap();
    let handle = engine(vec![(listing_url, Duration::ZERO, None)]);

    handle.fetch_listing();
    match handle.recv_timeout(WAIT).expect("listing event") {
        EngineEvent::ListingLoaded {
            restaurants,
            origin,
        } => {
            assert_eq!(origin, ListingOrigin::Fallback);
            assert_eq!(restaurants, fallback_restaurants());
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn live_listing_is_normalized() {
    engine_logging::initialize_for_tests();
    let listing_url = config().endpoints.listing_url().unwrap();
    let document = json!({ "data": { "cards": [
        { "card": { "card": { "gridElements": { "infoWithStyle": { "restaurants": [
            { "info": { "id": "1", "name": "Alpha" } }
        ]}}}}}
    ]}});
    let handle = engine(vec![(listing_url, Duration::ZERO, Some(document))]);

    handle.fetch_listing();
    match handle.recv_timeout(WAIT).expect("listing event") {
        EngineEvent::ListingLoaded {
            restaurants,
            origin,
        } => {
            assert_eq!(origin, ListingOrigin::Live);
            assert_eq!(restaurants.len(), 1);
            assert_eq!(restaurants[0].name, "Alpha");
        }
        other => panic!("unexpected event {other:?}"),
    }
}

#[test]
fn menu_failure_is_reported_without_fallback() {
    engine_logging::initialize_for_tests();
    let handle = engine(Vec::new());
    let (state, effects) = update(
        AppState::new(),
        Msg::MenuRequested {
            restaurant_id: "404".to_string(),
        },
    );
    let Some(Effect::FetchMenu { ticket }) = effects.into_iter().next() else {
        panic!("expected menu fetch");
    };

    handle.fetch_menu(ticket);
    let event = handle.recv_timeout(WAIT).expect("menu event");
    let (state, _) = update(state, to_msg(event));
    assert!(matches!(state.view().menu, MenuScreen::Unavailable { .. }));
}

#[test]
fn slow_stale_menu_does_not_override_latest_request() {
    engine_logging::initialize_for_tests();
    let endpoints = config().endpoints;
    let handle = engine(vec![
        (
            endpoints.menu_url("A"),
            Duration::from_millis(300),
            Some(menu_doc("Cafe A")),
        ),
        (
            endpoints.menu_url("B"),
            Duration::from_millis(10),
            Some(menu_doc("Bistro B")),
        ),
    ]);

    let mut state = AppState::new();
    for id in ["A", "B"] {
        let (next, effects) = update(
            state,
            Msg::MenuRequested {
                restaurant_id: id.to_string(),
            },
        );
        state = next;
        for effect in effects {
            if let Effect::FetchMenu { ticket } = effect {
                handle.fetch_menu(ticket);
            }
        }
    }

    let first = handle.recv_timeout(WAIT).expect("first completion");
    let second = handle.recv_timeout(WAIT).expect("second completion");
    assert!(matches!(&first, EngineEvent::MenuLoaded { ticket, .. } if ticket.restaurant_id == "B"));

    for event in [first, second] {
        let (next, _) = update(state, to_msg(event));
        state = next;
    }

    match state.view().menu {
        MenuScreen::Ready {
            restaurant_id,
            menu,
        } => {
            assert_eq!(restaurant_id, "B");
            assert_eq!(menu.restaurant.name, "Bistro B");
        }
        other => panic!("expected B's menu, got {other:?}"),
    }
}
