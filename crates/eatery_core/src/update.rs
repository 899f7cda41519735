use engine_logging::{engine_debug, engine_info};

use crate::{AppState, Effect, Msg};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::ListingRequested => {
            if state.begin_listing_fetch() {
                vec![Effect::FetchListing]
            } else {
                engine_debug!("Listing retrieval already outstanding");
                Vec::new()
            }
        }
        Msg::ListingLoaded {
            restaurants,
            origin,
        } => {
            engine_info!(
                "Listing loaded: {} restaurants ({:?})",
                restaurants.len(),
                origin
            );
            state.apply_listing(restaurants, origin);
            Vec::new()
        }
        Msg::SearchTextChanged(text) => {
            state.listing_mut().set_search_text(text);
            state.mark_dirty();
            Vec::new()
        }
        Msg::TopRatedClicked => {
            state.listing_mut().apply_top_rated_filter();
            state.mark_dirty();
            Vec::new()
        }
        Msg::ClearFiltersClicked => {
            state.listing_mut().clear_filters();
            state.mark_dirty();
            Vec::new()
        }
        Msg::PageSelected(target) => {
            match state.listing_mut().go_to_page(target) {
                Ok(()) => state.mark_dirty(),
                Err(err) => engine_debug!("Ignoring page request: {}", err),
            }
            Vec::new()
        }
        Msg::NextPageClicked => {
            if state.listing_mut().next_page() {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::PreviousPageClicked => {
            if state.listing_mut().previous_page() {
                state.mark_dirty();
            }
            Vec::new()
        }
        Msg::ConnectivityChanged { online } => {
            if state.set_online(online) {
                engine_info!("Connectivity changed: online={}", online);
            }
            Vec::new()
        }
        Msg::MenuRequested { restaurant_id } => {
            let restaurant_id = restaurant_id.trim();
            if restaurant_id.is_empty() {
                return (state, Vec::new());
            }
            match state.request_menu(restaurant_id) {
                Some(ticket) => vec![Effect::FetchMenu { ticket }],
                None => Vec::new(),
            }
        }
        Msg::MenuLoaded { ticket, menu } => {
            if !state.accept_menu(&ticket, menu) {
                engine_debug!(
                    "Discarding stale menu for {} (seq {})",
                    ticket.restaurant_id,
                    ticket.seq
                );
            }
            Vec::new()
        }
        Msg::MenuFailed { ticket, reason } => {
            if !state.reject_menu(&ticket, reason) {
                engine_debug!(
                    "Discarding stale menu failure for {} (seq {})",
                    ticket.restaurant_id,
                    ticket.seq
                );
            }
            Vec::new()
        }
        Msg::MenuClosed => {
            state.close_menu();
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
