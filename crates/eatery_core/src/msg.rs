use crate::{ListingOrigin, MenuTicket, PageToken, Restaurant, RestaurantMenu};

#[derive(Debug, Clone, PartialEq)]
pub enum Msg {
    /// The listing view was activated and wants data.
    ListingRequested,
    /// Engine finished the listing retrieval (live data or the fallback set).
    ListingLoaded {
        restaurants: Vec<Restaurant>,
        origin: ListingOrigin,
    },
    /// User submitted new search text.
    SearchTextChanged(String),
    /// User clicked "Top rated".
    TopRatedClicked,
    ClearFiltersClicked,
    /// User picked an entry from the page-number list.
    PageSelected(PageToken),
    NextPageClicked,
    PreviousPageClicked,
    /// Connectivity monitor observed a transition.
    ConnectivityChanged { online: bool },
    /// Routing activated the menu view for a restaurant.
    MenuRequested { restaurant_id: String },
    MenuLoaded {
        ticket: MenuTicket,
        menu: RestaurantMenu,
    },
    MenuFailed {
        ticket: MenuTicket,
        reason: String,
    },
    /// User navigated away from the menu view.
    MenuClosed,
    /// Input that changes nothing.
    NoOp,
}
