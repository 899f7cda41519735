use serde::Serialize;

use crate::{ListingOrigin, PageToken, Restaurant, RestaurantMenu};

/// Menu descriptions longer than this are shortened for display.
pub const DESCRIPTION_PREVIEW_CHARS: usize = 80;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AppViewModel {
    pub online: bool,
    pub listing: ListingScreen,
    pub menu: MenuScreen,
    #[serde(skip)]
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ListingScreen {
    /// Shown instead of any listing content while connectivity is down.
    Offline,
    Loading,
    Ready(ListingView),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingView {
    pub origin: ListingOrigin,
    /// Restaurants on the current page only.
    pub restaurants: Vec<Restaurant>,
    pub current_page: usize,
    pub page_count: usize,
    pub page_numbers: Vec<PageToken>,
    pub total_matches: usize,
    pub total_restaurants: usize,
    pub search_text: String,
    pub top_rated_only: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum MenuScreen {
    Hidden,
    Loading {
        restaurant_id: String,
    },
    Ready {
        restaurant_id: String,
        menu: RestaurantMenu,
    },
    Unavailable {
        restaurant_id: String,
        reason: String,
    },
}

/// First [`DESCRIPTION_PREVIEW_CHARS`] characters followed by `...` when cut.
pub fn description_preview(description: &str) -> String {
    if description.is_empty() {
        return "No description.".to_string();
    }
    let mut chars = description.chars();
    let head: String = chars.by_ref().take(DESCRIPTION_PREVIEW_CHARS).collect();
    if chars.next().is_some() {
        format!("{head}...")
    } else {
        head
    }
}

/// Minor units rendered as rupees, `-` when no price is known.
pub fn format_price(price_minor: Option<u64>) -> String {
    match price_minor {
        Some(minor) if minor % 100 == 0 => format!("₹{}", minor / 100),
        Some(minor) => format!("₹{}.{:02}", minor / 100, minor % 100),
        None => "-".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_descriptions_are_cut_on_char_boundaries() {
        let text = "é".repeat(DESCRIPTION_PREVIEW_CHARS + 5);
        let preview = description_preview(&text);
        assert!(preview.ends_with("..."));
        assert_eq!(preview.chars().count(), DESCRIPTION_PREVIEW_CHARS + 3);
    }

    #[test]
    fn exact_length_description_is_kept() {
        let text = "a".repeat(DESCRIPTION_PREVIEW_CHARS);
        assert_eq!(description_preview(&text), text);
        assert_eq!(description_preview(""), "No description.");
    }

    #[test]
    fn prices_render_in_major_units() {
        assert_eq!(format_price(Some(25000)), "₹250");
        assert_eq!(format_price(Some(24950)), "₹249.50");
        assert_eq!(format_price(Some(5)), "₹0.05");
        assert_eq!(format_price(None), "-");
    }
}
