use url::{form_urlencoded, Url};

use crate::{FailureKind, FetchError};

pub const DEFAULT_LISTING_BASE_URL: &str = "https://www.swiggy.com/dapi/restaurants/list/v5";
pub const DEFAULT_MENU_BASE_URL: &str = "https://www.swiggy.com/dapi/menu/pl?page-type=REGULAR_MENU&complete-menu=true&lat=23.022505&lng=72.5713621&restaurantId=";
pub const DEFAULT_LATITUDE: f64 = 23.022505;
pub const DEFAULT_LONGITUDE: f64 = 72.5713621;

/// Where the listing feed and menu documents live.
#[derive(Debug, Clone, PartialEq)]
pub struct FeedEndpoints {
    pub listing_base_url: String,
    /// The restaurant identifier is appended verbatim (after percent-encoding).
    pub menu_base_url: String,
    pub latitude: f64,
    pub longitude: f64,
}

impl Default for FeedEndpoints {
    fn default() -> Self {
        Self {
            listing_base_url: DEFAULT_LISTING_BASE_URL.to_string(),
            menu_base_url: DEFAULT_MENU_BASE_URL.to_string(),
            latitude: DEFAULT_LATITUDE,
            longitude: DEFAULT_LONGITUDE,
        }
    }
}

impl FeedEndpoints {
    /// Listing base URL with the fixed location and page-type query.
    pub fn listing_url(&self) -> Result<String, FetchError> {
        let mut url = Url::parse(&self.listing_base_url)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        url.query_pairs_mut()
            .append_pair("lat", &self.latitude.to_string())
            .append_pair("lng", &self.longitude.to_string())
            .append_pair("is-seo-homepage-enabled", "true")
            .append_pair("page_type", "DESKTOP_WEB_LISTING");
        Ok(url.into())
    }

    pub fn menu_url(&self, restaurant_id: &str) -> String {
        let encoded: String = form_urlencoded::byte_serialize(restaurant_id.as_bytes()).collect();
        format!("{}{}", self.menu_base_url, encoded)
    }
}
