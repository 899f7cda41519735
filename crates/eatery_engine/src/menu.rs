use std::collections::HashSet;

use eatery_core::{MenuItem, MenuSection, RestaurantMenu, RestaurantSummary};
use engine_logging::engine_debug;
use serde_json::Value;

use crate::shape;

const TOP_LEVEL_CARDS: &str = "/data/cards";
const RESTAURANT_INFO: &str = "/card/card/info";
const REGULAR_GROUP: &str = "/groupedCard/cardGroupMap/REGULAR/cards";

/// Known shapes of one top-level card in a menu document.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MenuCard<'a> {
    /// `card.card.info` carrying at least a restaurant name.
    RestaurantInfo(&'a Value),
    /// `groupedCard.cardGroupMap.REGULAR.cards`: candidate menu sections.
    RegularCardGroup(&'a [Value]),
    Unrecognized,
}

impl<'a> MenuCard<'a> {
    pub fn classify(entry: &'a Value) -> Self {
        if let Some(info) = entry.pointer(RESTAURANT_INFO) {
            if shape::text(info, "name").is_some() {
                return MenuCard::RestaurantInfo(info);
            }
        }
        if let Some(children) = entry.pointer(REGULAR_GROUP).and_then(Value::as_array) {
            return MenuCard::RegularCardGroup(children);
        }
        MenuCard::Unrecognized
    }
}

/// Extracts the restaurant header and its ordered menu sections.
///
/// The first card of each known shape wins. A document without a header
/// yields an empty summary, one without a regular group yields no sections.
pub fn normalize_menu(document: &Value) -> RestaurantMenu {
    let mut restaurant = None;
    let mut sections = None;

    for entry in shape::array_at(document, TOP_LEVEL_CARDS) {
        match MenuCard::classify(entry) {
            MenuCard::RestaurantInfo(info) if restaurant.is_none() => {
                restaurant = Some(summary_from_info(info));
            }
            MenuCard::RegularCardGroup(children) if sections.is_none() => {
                sections = Some(sections_from_group(children));
            }
            MenuCard::RestaurantInfo(_)
            | MenuCard::RegularCardGroup(_)
            | MenuCard::Unrecognized => {}
        }
    }

    let menu = RestaurantMenu {
        restaurant: restaurant.unwrap_or_default(),
        sections: sections.unwrap_or_default(),
    };
    engine_debug!(
        "Normalized menu for {:?}: {} sections",
        menu.restaurant.name,
        menu.sections.len()
    );
    menu
}

fn summary_from_info(info: &Value) -> RestaurantSummary {
    RestaurantSummary {
        id: shape::identifier(info, "id"),
        name: shape::text(info, "name").unwrap_or_default(),
        cuisines: shape::string_list(info, "cuisines"),
        area_name: shape::text(info, "areaName"),
        city: shape::text(info, "city"),
        avg_rating: shape::number(info, "avgRating"),
        total_ratings_text: shape::text(info, "totalRatingsString"),
        cost_for_two_message: shape::text(info, "costForTwoMessage"),
        image_id: shape::text(info, "cloudinaryImageId"),
    }
}

fn sections_from_group(children: &[Value]) -> Vec<MenuSection> {
    children
        .iter()
        .filter_map(|child| child.pointer("/card/card"))
        .filter_map(section_from_card)
        .collect()
}

/// Only cards with both a title and an item list are sections.
fn section_from_card(card: &Value) -> Option<MenuSection> {
    let title = shape::text(card, "title")?;
    let item_cards = card.get("itemCards")?.as_array()?;

    let mut seen = HashSet::new();
    let items = item_cards
        .iter()
        .filter_map(|item_card| item_card.pointer("/card/info"))
        .filter_map(item_from_info)
        .filter(|item| seen.insert(item.id.clone()))
        .collect();

    Some(MenuSection { title, items })
}

fn item_from_info(info: &Value) -> Option<MenuItem> {
    let id = shape::identifier(info, "id")?;

    let is_veg = shape::flag(info, "isVeg")
        .or_else(|| {
            info.pointer("/itemAttribute/vegClassifier")
                .and_then(Value::as_str)
                .map(|classifier| classifier.eq_ignore_ascii_case("VEG"))
        })
        .unwrap_or(false);

    // Zero means "not priced here" in these payloads.
    let price_minor = shape::unsigned(info, "price")
        .filter(|price| *price > 0)
        .or_else(|| shape::unsigned(info, "defaultPrice").filter(|price| *price > 0));

    Some(MenuItem {
        id,
        name: shape::text(info, "name").unwrap_or_default(),
        is_veg,
        is_bestseller: shape::flag(info, "isBestseller").unwrap_or(false),
        price_minor,
        description: info
            .get("description")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        image_id: shape::text(info, "imageId"),
    })
}
