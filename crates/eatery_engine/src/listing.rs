use std::collections::HashSet;

use eatery_core::{CostForTwo, Restaurant};
use engine_logging::{engine_debug, engine_trace};
use serde_json::Value;

use crate::shape;

const TOP_LEVEL_CARDS: &str = "/data/cards";
const GRID_RESTAURANTS: &str = "/card/card/gridElements/infoWithStyle/restaurants";
const LEGACY_CARDS: &str = "/data/data/cards";

/// Known shapes of one top-level card in the listing feed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ListingCard<'a> {
    /// Current feed: `card.card.gridElements.infoWithStyle.restaurants[*].info`.
    Grid(&'a [Value]),
    /// Older feed: `data.data.cards[*].data`.
    LegacyCards(&'a [Value]),
    Unrecognized,
}

impl<'a> ListingCard<'a> {
    pub fn classify(entry: &'a Value) -> Self {
        if let Some(items) = entry.pointer(GRID_RESTAURANTS).and_then(Value::as_array) {
            return ListingCard::Grid(items);
        }
        if let Some(items) = entry.pointer(LEGACY_CARDS).and_then(Value::as_array) {
            return ListingCard::LegacyCards(items);
        }
        ListingCard::Unrecognized
    }

    fn restaurants(self) -> Vec<Restaurant> {
        let (items, info_key) = match self {
            ListingCard::Grid(items) => (items, "info"),
            ListingCard::LegacyCards(items) => (items, "data"),
            ListingCard::Unrecognized => return Vec::new(),
        };
        items
            .iter()
            .filter_map(|item| item.get(info_key))
            .filter_map(restaurant_from_info)
            .collect()
    }
}

/// Extracts every restaurant from a listing feed document.
///
/// All top-level cards are scanned regardless of position. Records keep feed
/// order and a repeated `id` keeps its first occurrence.
pub fn normalize_listing(document: &Value) -> Vec<Restaurant> {
    let cards = shape::array_at(document, TOP_LEVEL_CARDS);
    let mut seen = HashSet::new();
    let mut restaurants = Vec::new();
    let mut duplicates = 0usize;

    for (index, entry) in cards.iter().enumerate() {
        let card = ListingCard::classify(entry);
        if card == ListingCard::Unrecognized {
            engine_trace!("Listing card {} has no restaurant shape", index);
            continue;
        }
        for restaurant in card.restaurants() {
            if seen.insert(restaurant.id.clone()) {
                restaurants.push(restaurant);
            } else {
                duplicates += 1;
            }
        }
    }

    engine_debug!(
        "Normalized {} restaurants from {} cards ({} duplicates dropped)",
        restaurants.len(),
        cards.len(),
        duplicates
    );
    restaurants
}

/// Restaurants from a list of grid items (`[{ "info": {..} }, ..]`).
pub(crate) fn restaurants_from_grid_items(items: &[Value]) -> Vec<Restaurant> {
    ListingCard::Grid(items).restaurants()
}

/// A record without a usable `id` has no identity and is skipped; every
/// other field is optional.
fn restaurant_from_info(info: &Value) -> Option<Restaurant> {
    let Some(id) = shape::identifier(info, "id") else {
        engine_debug!("Skipping restaurant record without id");
        return None;
    };

    let cost_for_two = match info.get("costForTwo") {
        Some(Value::String(label)) if !label.trim().is_empty() => {
            Some(CostForTwo::Label(label.trim().to_string()))
        }
        Some(Value::Number(_)) => shape::unsigned(info, "costForTwo").map(CostForTwo::Minor),
        _ => None,
    };

    let delivery_time_minutes = info
        .get("sla")
        .and_then(|sla| shape::unsigned(sla, "deliveryTime"))
        .or_else(|| shape::unsigned(info, "deliveryTime"))
        .and_then(|minutes| u32::try_from(minutes).ok());

    Some(Restaurant {
        id,
        name: shape::text(info, "name").unwrap_or_default(),
        cuisines: shape::string_list(info, "cuisines"),
        avg_rating: shape::number(info, "avgRating"),
        cost_for_two,
        delivery_time_minutes,
        image_id: shape::text(info, "cloudinaryImageId"),
    })
}
