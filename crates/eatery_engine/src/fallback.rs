use eatery_core::Restaurant;
use engine_logging::engine_error;
use serde_json::Value;

use crate::listing::restaurants_from_grid_items;

const FALLBACK_JSON: &str = include_str!("../data/fallback_restaurants.json");

/// Bundled restaurants shown when the live listing feed cannot be retrieved.
pub fn fallback_restaurants() -> Vec<Restaurant> {
    match serde_json::from_str::<Value>(FALLBACK_JSON) {
        Ok(Value::Array(items)) => restaurants_from_grid_items(&items),
        Ok(_) => {
            engine_error!("Bundled fallback dataset is not a list");
            Vec::new()
        }
        Err(err) => {
            engine_error!("Bundled fallback dataset is invalid: {}", err);
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn fallback_set_is_non_empty_with_unique_ids() {
        let restaurants = fallback_restaurants();
        assert!(restaurants.len() > 5);
        let ids: HashSet<_> = restaurants.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids.len(), restaurants.len());
    }

    #[test]
    fn unrated_fallback_entry_is_kept() {
        let restaurants = fallback_restaurants();
        let thali = restaurants
            .iter()
            .find(|r| r.name == "Rajwadu Thali")
            .expect("thali present");
        assert_eq!(thali.avg_rating, None);
        assert_eq!(thali.image_id, None);
        assert_eq!(thali.delivery_time_minutes, Some(40));
    }
}
