use serde::Serialize;

/// One restaurant as it appears in a normalized listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    pub cuisines: Vec<String>,
    pub avg_rating: Option<f64>,
    pub cost_for_two: Option<CostForTwo>,
    pub delivery_time_minutes: Option<u32>,
    pub image_id: Option<String>,
}

impl Restaurant {
    /// Minimal record; every optional attribute unset.
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            cuisines: Vec::new(),
            avg_rating: None,
            cost_for_two: None,
            delivery_time_minutes: None,
            image_id: None,
        }
    }
}

/// Older feeds carry an amount in minor units, newer ones a pre-formatted label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum CostForTwo {
    Minor(u64),
    Label(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum ListingOrigin {
    #[default]
    Live,
    /// The bundled dataset, shown because the live feed could not be retrieved.
    Fallback,
}

/// Descriptive header of a restaurant's menu page.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RestaurantSummary {
    pub id: Option<String>,
    pub name: String,
    pub cuisines: Vec<String>,
    pub area_name: Option<String>,
    pub city: Option<String>,
    pub avg_rating: Option<f64>,
    pub total_ratings_text: Option<String>,
    pub cost_for_two_message: Option<String>,
    pub image_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuSection {
    pub title: String,
    pub items: Vec<MenuItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub id: String,
    pub name: String,
    pub is_veg: bool,
    pub is_bestseller: bool,
    pub price_minor: Option<u64>,
    /// Full text; shortening for display happens at the presentation edge.
    pub description: String,
    pub image_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct RestaurantMenu {
    pub restaurant: RestaurantSummary,
    pub sections: Vec<MenuSection>,
}
