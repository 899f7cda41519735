//! Eatery core: data model, listing view state and the pure state machine.
mod effect;
mod listing;
mod model;
mod msg;
mod state;
mod update;
mod view_model;

pub use effect::Effect;
pub use listing::{
    page_numbers, InvalidPageRequest, ListingViewState, PageToken, DEFAULT_PAGE_SIZE,
    TOP_RATED_THRESHOLD,
};
pub use model::{
    CostForTwo, ListingOrigin, MenuItem, MenuSection, Restaurant, RestaurantMenu,
    RestaurantSummary,
};
pub use msg::Msg;
pub use state::{AppState, ListingStatus, MenuState, MenuTicket};
pub use update::update;
pub use view_model::{
    description_preview, format_price, AppViewModel, ListingScreen, ListingView, MenuScreen,
    DESCRIPTION_PREVIEW_CHARS,
};
