use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use eatery_core::{ListingOrigin, MenuTicket, Restaurant, RestaurantMenu};
use engine_logging::{engine_error, engine_info, engine_warn};
use serde_json::Value;

use crate::connectivity::{run_probe, ConnectivityMonitor, ProbeSettings};
use crate::fetch::{fetch_json, FetchSettings, Fetcher, ReqwestFetcher};
use crate::{fallback_restaurants, normalize_listing, normalize_menu};
use crate::{EngineEvent, FeedEndpoints, FetchError};

#[derive(Debug, Clone, Default)]
pub struct EngineConfig {
    pub fetch: FetchSettings,
    pub endpoints: FeedEndpoints,
    pub probe: ProbeSettings,
}

enum EngineCommand {
    FetchListing,
    FetchMenu { ticket: MenuTicket },
}

/// Runs retrievals on a background runtime and hands results back as events.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig, monitor: ConnectivityMonitor) -> Self {
        let fetcher = Arc::new(ReqwestFetcher::new(config.fetch.clone()));
        Self::with_fetcher(config, fetcher, monitor)
    }

    pub fn with_fetcher(
        config: EngineConfig,
        fetcher: Arc<dyn Fetcher>,
        monitor: ConnectivityMonitor,
    ) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let endpoints = Arc::new(config.endpoints);
        let probe = config.probe;

        thread::spawn(move || {
            let runtime = match tokio::runtime::Builder::new_multi_thread()
                .worker_threads(1)
                .enable_all()
                .build()
            {
                Ok(runtime) => runtime,
                Err(err) => {
                    engine_error!("Failed to start engine runtime: {}", err);
                    return;
                }
            };

            if probe.enabled {
                runtime.spawn(run_probe(monitor, probe));
            }

            while let Ok(command) = cmd_rx.recv() {
                let fetcher = fetcher.clone();
                let endpoints = endpoints.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    let event = handle_command(fetcher.as_ref(), &endpoints, command).await;
                    let _ = event_tx.send(event);
                });
            }
        });

        Self { cmd_tx, event_rx }
    }

    pub fn fetch_listing(&self) {
        let _ = self.cmd_tx.send(EngineCommand::FetchListing);
    }

    pub fn fetch_menu(&self, ticket: MenuTicket) {
        let _ = self.cmd_tx.send(EngineCommand::FetchMenu { ticket });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    fetcher: &dyn Fetcher,
    endpoints: &FeedEndpoints,
    command: EngineCommand,
) -> EngineEvent {
    match command {
        EngineCommand::FetchListing => {
            let (restaurants, origin) = load_listing(fetcher, endpoints).await;
            EngineEvent::ListingLoaded {
                restaurants,
                origin,
            }
        }
        EngineCommand::FetchMenu { ticket } => {
            let result = load_menu(fetcher, endpoints, &ticket.restaurant_id).await;
            EngineEvent::MenuLoaded { ticket, result }
        }
    }
}

/// One retrieval of the raw listing feed.
pub async fn fetch_listing_document(
    fetcher: &dyn Fetcher,
    endpoints: &FeedEndpoints,
) -> Result<Value, FetchError> {
    let url = endpoints.listing_url()?;
    fetch_json(fetcher, &url).await
}

/// One retrieval of the raw menu document for `restaurant_id`.
pub async fn fetch_menu_document(
    fetcher: &dyn Fetcher,
    endpoints: &FeedEndpoints,
    restaurant_id: &str,
) -> Result<Value, FetchError> {
    fetch_json(fetcher, &endpoints.menu_url(restaurant_id)).await
}

/// Normalized listing, or the bundled set when the feed cannot be retrieved.
pub async fn load_listing(
    fetcher: &dyn Fetcher,
    endpoints: &FeedEndpoints,
) -> (Vec<Restaurant>, ListingOrigin) {
    match fetch_listing_document(fetcher, endpoints).await {
        Ok(document) => {
            let restaurants = normalize_listing(&document);
            engine_info!("Live listing: {} restaurants", restaurants.len());
            (restaurants, ListingOrigin::Live)
        }
        Err(err) => {
            engine_warn!("Listing retrieval failed, using bundled data: {}", err);
            (fallback_restaurants(), ListingOrigin::Fallback)
        }
    }
}

pub async fn load_menu(
    fetcher: &dyn Fetcher,
    endpoints: &FeedEndpoints,
    restaurant_id: &str,
) -> Result<RestaurantMenu, FetchError> {
    let document = fetch_menu_document(fetcher, endpoints, restaurant_id)
        .await
        .inspect_err(|err| engine_warn!("Menu retrieval for {} failed: {}", restaurant_id, err))?;
    Ok(normalize_menu(&document))
}
