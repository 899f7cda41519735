use std::collections::HashMap;

use serde::Serialize;

use crate::listing::ListingViewState;
use crate::view_model::{AppViewModel, ListingScreen, ListingView, MenuScreen};
use crate::{ListingOrigin, Restaurant, RestaurantMenu};

/// Tag carried by a menu retrieval so its completion can be matched against
/// the request that is current when it resolves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuTicket {
    pub seq: u64,
    pub restaurant_id: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListingStatus {
    #[default]
    Idle,
    Loading,
    Ready(ListingOrigin),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum MenuState {
    #[default]
    Idle,
    Loading {
        ticket: MenuTicket,
    },
    Loaded {
        ticket: MenuTicket,
        menu: RestaurantMenu,
    },
    Unavailable {
        ticket: MenuTicket,
        reason: String,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    listing: ListingViewState,
    listing_status: ListingStatus,
    online: bool,
    menu: MenuState,
    /// Restaurant id to the sequence number of its in-flight retrieval.
    menu_in_flight: HashMap<String, u64>,
    next_menu_seq: u64,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_listing(ListingViewState::default())
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self::with_listing(ListingViewState::with_page_size(page_size))
    }

    fn with_listing(listing: ListingViewState) -> Self {
        Self {
            listing,
            listing_status: ListingStatus::Idle,
            online: true,
            menu: MenuState::Idle,
            menu_in_flight: HashMap::new(),
            next_menu_seq: 1,
            dirty: false,
        }
    }

    pub fn view(&self) -> AppViewModel {
        let listing = if !self.online {
            ListingScreen::Offline
        } else {
            match self.listing_status {
                ListingStatus::Idle | ListingStatus::Loading => ListingScreen::Loading,
                ListingStatus::Ready(origin) => ListingScreen::Ready(self.listing_view(origin)),
            }
        };

        let menu = match &self.menu {
            MenuState::Idle => MenuScreen::Hidden,
            MenuState::Loading { ticket } => MenuScreen::Loading {
                restaurant_id: ticket.restaurant_id.clone(),
            },
            MenuState::Loaded { ticket, menu } => MenuScreen::Ready {
                restaurant_id: ticket.restaurant_id.clone(),
                menu: menu.clone(),
            },
            MenuState::Unavailable { ticket, reason } => MenuScreen::Unavailable {
                restaurant_id: ticket.restaurant_id.clone(),
                reason: reason.clone(),
            },
        };

        AppViewModel {
            online: self.online,
            listing,
            menu,
            dirty: self.dirty,
        }
    }

    fn listing_view(&self, origin: ListingOrigin) -> ListingView {
        let filtered = self.listing.filtered_view();
        ListingView {
            origin,
            restaurants: self.listing.visible_slice().into_iter().cloned().collect(),
            current_page: self.listing.current_page(),
            page_count: self.listing.page_count(),
            page_numbers: self.listing.page_numbers(),
            total_matches: filtered.len(),
            total_restaurants: self.listing.source().len(),
            search_text: self.listing.search_text().to_string(),
            top_rated_only: self.listing.rating_threshold().is_some(),
        }
    }

    pub fn listing(&self) -> &ListingViewState {
        &self.listing
    }

    pub fn listing_status(&self) -> ListingStatus {
        self.listing_status
    }

    pub fn menu(&self) -> &MenuState {
        &self.menu
    }

    pub fn is_online(&self) -> bool {
        self.online
    }

    /// Returns and clears the dirty flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn listing_mut(&mut self) -> &mut ListingViewState {
        &mut self.listing
    }

    /// Returns false while a listing retrieval is already outstanding.
    pub(crate) fn begin_listing_fetch(&mut self) -> bool {
        if self.listing_status == ListingStatus::Loading {
            return false;
        }
        self.listing_status = ListingStatus::Loading;
        self.mark_dirty();
        true
    }

    pub(crate) fn apply_listing(&mut self, restaurants: Vec<Restaurant>, origin: ListingOrigin) {
        self.listing.set_source(restaurants);
        self.listing_status = ListingStatus::Ready(origin);
        self.mark_dirty();
    }

    /// Returns whether connectivity actually changed.
    pub(crate) fn set_online(&mut self, online: bool) -> bool {
        if self.online == online {
            return false;
        }
        self.online = online;
        self.mark_dirty();
        true
    }

    /// Issues a ticket for `restaurant_id` unless that identifier is already
    /// current or has a retrieval in flight.
    ///
    /// An identifier with a retrieval in flight becomes current again under
    /// its existing ticket, so at most one retrieval per id is ever running.
    pub(crate) fn request_menu(&mut self, restaurant_id: &str) -> Option<MenuTicket> {
        let already_current = matches!(
            &self.menu,
            MenuState::Loading { ticket } | MenuState::Loaded { ticket, .. }
                if ticket.restaurant_id == restaurant_id
        );
        if already_current {
            return None;
        }

        if let Some(&seq) = self.menu_in_flight.get(restaurant_id) {
            self.menu = MenuState::Loading {
                ticket: MenuTicket {
                    seq,
                    restaurant_id: restaurant_id.to_string(),
                },
            };
            self.mark_dirty();
            return None;
        }

        let ticket = MenuTicket {
            seq: self.next_menu_seq,
            restaurant_id: restaurant_id.to_string(),
        };
        self.next_menu_seq += 1;
        self.menu_in_flight
            .insert(ticket.restaurant_id.clone(), ticket.seq);
        self.menu = MenuState::Loading {
            ticket: ticket.clone(),
        };
        self.mark_dirty();
        Some(ticket)
    }

    /// Stores `menu` if `ticket` is the outstanding one; returns false for stale results.
    pub(crate) fn accept_menu(&mut self, ticket: &MenuTicket, menu: RestaurantMenu) -> bool {
        self.finish_menu_retrieval(ticket);
        if !self.is_awaiting(ticket) {
            return false;
        }
        self.menu = MenuState::Loaded {
            ticket: ticket.clone(),
            menu,
        };
        self.mark_dirty();
        true
    }

    pub(crate) fn reject_menu(&mut self, ticket: &MenuTicket, reason: String) -> bool {
        self.finish_menu_retrieval(ticket);
        if !self.is_awaiting(ticket) {
            return false;
        }
        self.menu = MenuState::Unavailable {
            ticket: ticket.clone(),
            reason,
        };
        self.mark_dirty();
        true
    }

    pub(crate) fn close_menu(&mut self) {
        if self.menu != MenuState::Idle {
            self.menu = MenuState::Idle;
            self.mark_dirty();
        }
    }

    fn finish_menu_retrieval(&mut self, ticket: &MenuTicket) {
        if self.menu_in_flight.get(&ticket.restaurant_id) == Some(&ticket.seq) {
            self.menu_in_flight.remove(&ticket.restaurant_id);
        }
    }

    /// A completion counts when the menu is loading the identifier it was issued for.
    fn is_awaiting(&self, ticket: &MenuTicket) -> bool {
        matches!(
            &self.menu,
            MenuState::Loading { ticket: current } if current.restaurant_id == ticket.restaurant_id
        )
    }
}
