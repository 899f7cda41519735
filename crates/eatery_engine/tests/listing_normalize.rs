use std::collections::HashSet;

use eatery_core::CostForTwo;
use eatery_engine::{normalize_listing, ListingCard};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn grid_card(restaurants: Value) -> Value {
    json!({
        "card": {
            "card": {
                "gridElements": {
                    "infoWithStyle": { "restaurants": restaurants }
                }
            }
        }
    })
}

fn grid_restaurant(id: &str, name: &str) -> Value {
    json!({ "info": { "id": id, "name": name, "avgRating": 4.2 } })
}

fn feed(cards: Vec<Value>) -> Value {
    json!({ "data": { "cards": cards } })
}

fn ids(document: &Value) -> Vec<String> {
    normalize_listing(document)
        .into_iter()
        .map(|restaurant| restaurant.id)
        .collect()
}

#[test]
fn restaurants_split_across_cards_are_merged_and_deduplicated() {
    let document = feed(vec![
        json!({ "card": { "card": { "header": { "title": "Banner" } } } }),
        json!({ "card": { "card": { "imageGridCards": {} } } }),
        grid_card(json!([
            grid_restaurant("1", "Alpha"),
            grid_restaurant("2", "Bravo"),
        ])),
        json!({ "card": { "card": { "facetList": [] } } }),
        grid_card(json!([
            grid_restaurant("3", "Charlie"),
            {"info": { "id": "2", "name": "Bravo (again)" }},
            grid_restaurant("4", "Delta"),
        ])),
    ]);

    let restaurants = normalize_listing(&document);
    let names: Vec<_> = restaurants.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Alpha", "Bravo", "Charlie", "Delta"]);
}

#[test]
fn missing_optional_fields_do_not_drop_records() {
    let document = feed(vec![grid_card(json!([
        { "info": { "id": "10", "name": "Bare" } },
        { "info": { "id": "11", "name": "Placeholder rating", "avgRating": "--" } },
    ]))]);

    let restaurants = normalize_listing(&document);
    assert_eq!(restaurants.len(), 2);
    let bare = &restaurants[0];
    assert!(bare.cuisines.is_empty());
    assert_eq!(bare.avg_rating, None);
    assert_eq!(bare.delivery_time_minutes, None);
    assert_eq!(bare.cost_for_two, None);
    assert_eq!(bare.image_id, None);
    assert_eq!(restaurants[1].avg_rating, None);
}

#[test]
fn current_feed_fields_are_mapped() {
    let document = feed(vec![grid_card(json!([{
        "info": {
            "id": "253",
            "name": "Pizza Hut",
            "cloudinaryImageId": "abc123",
            "cuisines": ["Pizzas", "Italian"],
            "avgRating": 4.1,
            "costForTwo": "₹350 for two",
            "sla": { "deliveryTime": 27 }
        }
    }]))]);

    let restaurant = &normalize_listing(&document)[0];
    assert_eq!(restaurant.id, "253");
    assert_eq!(restaurant.cuisines, vec!["Pizzas", "Italian"]);
    assert_eq!(restaurant.avg_rating, Some(4.1));
    assert_eq!(
        restaurant.cost_for_two,
        Some(CostForTwo::Label("₹350 for two".to_string()))
    );
    assert_eq!(restaurant.delivery_time_minutes, Some(27));
    assert_eq!(restaurant.image_id.as_deref(), Some("abc123"));
}

#[test]
fn legacy_nested_cards_are_read() {
    let document = feed(vec![json!({
        "cardType": "seeAllRestaurants",
        "data": {
            "data": {
                "cards": [
                    { "type": "restaurant", "data": {
                        "id": 334475, "name": "KFC", "avgRating": "3.8",
                        "costForTwo": 40000, "deliveryTime": 36
                    }},
                    { "type": "restaurant", "data": { "name": "No id" } },
                ]
            }
        }
    })]);

    let restaurants = normalize_listing(&document);
    assert_eq!(restaurants.len(), 1);
    let kfc = &restaurants[0];
    assert_eq!(kfc.id, "334475");
    assert_eq!(kfc.avg_rating, Some(3.8));
    assert_eq!(kfc.cost_for_two, Some(CostForTwo::Minor(40000)));
    assert_eq!(kfc.delivery_time_minutes, Some(36));
}

#[test]
fn malformed_documents_yield_nothing() {
    assert!(normalize_listing(&json!(null)).is_empty());
    assert!(normalize_listing(&json!({ "data": {} })).is_empty());
    assert!(normalize_listing(&json!({ "data": { "cards": "oops" } })).is_empty());

    let document = feed(vec![
        grid_card(json!("not a list")),
        json!(42),
        grid_card(json!([{ "info": "not an object" }, { "noinfo": true }])),
        grid_card(json!([grid_restaurant("5", "Echo")])),
    ]);
    assert_eq!(ids(&document), vec!["5".to_string()]);
}

#[test]
fn classification_recognises_each_shape() {
    let grid = grid_card(json!([]));
    let legacy = json!({ "data": { "data": { "cards": [] } } });
    let other = json!({ "card": {} });

    assert!(matches!(ListingCard::classify(&grid), ListingCard::Grid(_)));
    assert!(matches!(ListingCard::classify(&legacy), ListingCard::LegacyCards(_)));
    assert_eq!(ListingCard::classify(&other), ListingCard::Unrecognized);
}

#[test]
fn output_ids_are_unique_for_overlapping_cards() {
    let cards = (0..6)
        .map(|card| {
            let restaurants: Vec<Value> = (0..10)
                .map(|i| grid_restaurant(&format!("{}", (card * 3 + i) % 17), "Dup"))
                .collect();
            grid_card(Value::Array(restaurants))
        })
        .collect();
    let document = feed(cards);

    let ids = ids(&document);
    let unique: HashSet<_> = ids.iter().collect();
    assert_eq!(unique.len(), ids.len());
    assert_eq!(ids.len(), 17);
}
