//! Eatery engine: feed retrieval, normalization and effect execution.
mod connectivity;
mod endpoints;
mod engine;
mod fallback;
mod fetch;
mod listing;
mod menu;
mod shape;
mod types;

pub use connectivity::{
    initial_connectivity, probe_once, ConnectivityMonitor, ProbeSettings, Subscription,
    DEFAULT_PROBE_ADDRESS,
};
pub use endpoints::{
    FeedEndpoints, DEFAULT_LATITUDE, DEFAULT_LISTING_BASE_URL, DEFAULT_LONGITUDE,
    DEFAULT_MENU_BASE_URL,
};
pub use engine::{
    fetch_listing_document, fetch_menu_document, load_listing, load_menu, EngineConfig,
    EngineHandle,
};
pub use fallback::fallback_restaurants;
pub use fetch::{fetch_json, FetchSettings, Fetcher, ReqwestFetcher};
pub use listing::{normalize_listing, ListingCard};
pub use menu::{normalize_menu, MenuCard};
pub use types::{EngineEvent, FailureKind, FetchError, FetchMetadata, FetchOutput};
