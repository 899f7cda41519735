use std::fmt::Write as _;

use eatery_core::{
    description_preview, format_price, AppViewModel, CostForTwo, ListingOrigin, ListingScreen,
    ListingView, MenuScreen, PageToken, Restaurant, RestaurantMenu,
};

pub const OFFLINE_NOTICE: &str =
    "Looks like you're offline. Please check your internet connection.";
pub const EMPTY_LISTING: &str = "No restaurants found. Try adjusting your search or filters.";

/// The menu when one is open, the listing otherwise.
pub fn render_text(view: &AppViewModel) -> String {
    match &view.menu {
        MenuScreen::Hidden => render_listing(&view.listing),
        menu => render_menu(menu),
    }
}

pub fn render_json(view: &AppViewModel) -> serde_json::Result<String> {
    serde_json::to_string_pretty(view)
}

pub fn render_listing(screen: &ListingScreen) -> String {
    match screen {
        ListingScreen::Offline => OFFLINE_NOTICE.to_string(),
        ListingScreen::Loading => "Loading restaurants...".to_string(),
        ListingScreen::Ready(listing) => render_listing_view(listing),
    }
}

fn render_listing_view(listing: &ListingView) -> String {
    let mut out = String::new();

    let mut filters = Vec::new();
    if !listing.search_text.is_empty() {
        filters.push(format!("search {:?}", listing.search_text));
    }
    if listing.top_rated_only {
        filters.push("top rated".to_string());
    }
    let _ = write!(
        out,
        "Restaurants: {} of {}",
        listing.total_matches, listing.total_restaurants
    );
    if !filters.is_empty() {
        let _ = write!(out, " ({})", filters.join(", "));
    }
    if listing.origin == ListingOrigin::Fallback {
        out.push_str(" [offline data]");
    }
    out.push('\n');

    if listing.restaurants.is_empty() {
        out.push_str(EMPTY_LISTING);
        out.push('\n');
        return out;
    }

    for restaurant in &listing.restaurants {
        out.push_str(&restaurant_line(restaurant));
        out.push('\n');
    }
    let _ = writeln!(
        out,
        "Pages: {}",
        pagination_line(&listing.page_numbers, listing.current_page)
    );
    out
}

fn restaurant_line(restaurant: &Restaurant) -> String {
    let rating = restaurant
        .avg_rating
        .map(|rating| format!("★ {rating:.1}"))
        .unwrap_or_else(|| "★ --".to_string());
    let cost = match &restaurant.cost_for_two {
        Some(CostForTwo::Minor(minor)) => format!("{} for two", format_price(Some(*minor))),
        Some(CostForTwo::Label(label)) => label.clone(),
        None => "-".to_string(),
    };
    let delivery = restaurant
        .delivery_time_minutes
        .map(|minutes| format!("{minutes} mins"))
        .unwrap_or_else(|| "-".to_string());

    let mut line = format!("[{}] {}  {}  {}  {}", restaurant.id, restaurant.name, rating, cost, delivery);
    if !restaurant.cuisines.is_empty() {
        let _ = write!(line, "\n      {}", restaurant.cuisines.join(", "));
    }
    line
}

/// `1 … 4 [5] 6 … 8`: the current page is bracketed.
pub fn pagination_line(tokens: &[PageToken], current: usize) -> String {
    tokens
        .iter()
        .map(|token| match token {
            PageToken::Page(page) if *page == current => format!("[{page}]"),
            PageToken::Page(page) => page.to_string(),
            PageToken::Ellipsis => "…".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn render_menu(screen: &MenuScreen) -> String {
    match screen {
        MenuScreen::Hidden => String::new(),
        MenuScreen::Loading { restaurant_id } => {
            format!("Loading menu for restaurant {restaurant_id}...")
        }
        MenuScreen::Unavailable {
            restaurant_id,
            reason,
        } => format!("Menu for restaurant {restaurant_id} is unavailable: {reason}"),
        MenuScreen::Ready { menu, .. } => render_menu_view(menu),
    }
}

fn render_menu_view(menu: &RestaurantMenu) -> String {
    let mut out = String::new();
    let header = &menu.restaurant;
    let _ = writeln!(out, "{}", header.name);
    if !header.cuisines.is_empty() {
        let _ = writeln!(out, "{}", header.cuisines.join(", "));
    }
    let place: Vec<&str> = [header.area_name.as_deref(), header.city.as_deref()]
        .into_iter()
        .flatten()
        .collect();
    if !place.is_empty() {
        let _ = writeln!(out, "{}", place.join(", "));
    }
    let mut facts = Vec::new();
    if let Some(rating) = header.avg_rating {
        match &header.total_ratings_text {
            Some(total) => facts.push(format!("★ {rating:.1} ({total})")),
            None => facts.push(format!("★ {rating:.1}")),
        }
    }
    if let Some(cost) = &header.cost_for_two_message {
        facts.push(cost.clone());
    }
    if !facts.is_empty() {
        let _ = writeln!(out, "{}", facts.join(" | "));
    }

    if menu.sections.is_empty() {
        out.push_str("\nNo menu items available.\n");
        return out;
    }
    for section in &menu.sections {
        let _ = writeln!(out, "\n{} ({})", section.title, section.items.len());
        for item in &section.items {
            let marker = if item.is_veg { "veg" } else { "non-veg" };
            let _ = write!(
                out,
                "  - {} [{}] {}",
                item.name,
                marker,
                format_price(item.price_minor)
            );
            if item.is_bestseller {
                out.push_str(" (bestseller)");
            }
            let _ = writeln!(out, "\n    {}", description_preview(&item.description));
        }
    }
    out
}
