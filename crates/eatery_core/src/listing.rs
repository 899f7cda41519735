use serde::Serialize;
use thiserror::Error;

use crate::Restaurant;

pub const DEFAULT_PAGE_SIZE: usize = 20;
/// Ratings strictly above this value count as top rated.
pub const TOP_RATED_THRESHOLD: f64 = 4.0;

/// Pagination beyond this many pages is compacted with ellipsis markers.
const COMPACT_AFTER_PAGES: usize = 5;

/// One entry in the compact page-number list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PageToken {
    Page(usize),
    /// Placeholder for skipped pages; never a valid navigation target.
    Ellipsis,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidPageRequest {
    #[error("page {requested} is outside 1..={last}")]
    OutOfRange { requested: usize, last: usize },
    #[error("ellipsis marker is not a page")]
    NotAPage,
}

/// Search text, rating filter and page window over one normalized listing.
///
/// Only `source` and the filter inputs are stored. The filtered view, the
/// visible slice and the page count are recomputed from `source` on every
/// read, so the two filters compose in any order and clearing one never has
/// to undo the other.
#[derive(Debug, Clone, PartialEq)]
pub struct ListingViewState {
    source: Vec<Restaurant>,
    search_text: String,
    rating_threshold: Option<f64>,
    current_page: usize,
    page_size: usize,
}

impl Default for ListingViewState {
    fn default() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }
}

impl ListingViewState {
    pub fn new() -> Self {
        Self::default()
    }

    /// A zero page size is bumped to one.
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            source: Vec::new(),
            search_text: String::new(),
            rating_threshold: None,
            current_page: 1,
            page_size: page_size.max(1),
        }
    }

    pub fn source(&self) -> &[Restaurant] {
        &self.source
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    pub fn rating_threshold(&self) -> Option<f64> {
        self.rating_threshold
    }

    pub fn current_page(&self) -> usize {
        self.current_page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    pub fn set_source(&mut self, source: Vec<Restaurant>) {
        self.source = source;
        self.current_page = 1;
    }

    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
        self.current_page = 1;
    }

    pub fn apply_top_rated_filter(&mut self) {
        self.rating_threshold = Some(TOP_RATED_THRESHOLD);
        self.current_page = 1;
    }

    pub fn clear_filters(&mut self) {
        self.search_text.clear();
        self.rating_threshold = None;
        self.current_page = 1;
    }

    /// Moves to `target`. State is left untouched when the request is rejected.
    pub fn go_to_page(&mut self, target: PageToken) -> Result<(), InvalidPageRequest> {
        let requested = match target {
            PageToken::Page(n) => n,
            PageToken::Ellipsis => return Err(InvalidPageRequest::NotAPage),
        };
        let last = self.last_page();
        if requested == 0 || requested > last {
            return Err(InvalidPageRequest::OutOfRange { requested, last });
        }
        self.current_page = requested;
        Ok(())
    }

    /// Returns whether the page changed.
    pub fn next_page(&mut self) -> bool {
        if self.current_page < self.last_page() {
            self.current_page += 1;
            true
        } else {
            false
        }
    }

    /// Returns whether the page changed.
    pub fn previous_page(&mut self) -> bool {
        if self.current_page > 1 {
            self.current_page -= 1;
            true
        } else {
            false
        }
    }

    pub fn filtered_view(&self) -> Vec<&Restaurant> {
        let needle = self.search_text.to_lowercase();
        self.source
            .iter()
            .filter(|restaurant| restaurant.name.to_lowercase().contains(&needle))
            .filter(|restaurant| match self.rating_threshold {
                Some(threshold) => restaurant
                    .avg_rating
                    .is_some_and(|rating| rating > threshold),
                None => true,
            })
            .collect()
    }

    pub fn page_count(&self) -> usize {
        self.filtered_view().len().div_ceil(self.page_size)
    }

    pub fn visible_slice(&self) -> Vec<&Restaurant> {
        self.filtered_view()
            .into_iter()
            .skip((self.current_page - 1) * self.page_size)
            .take(self.page_size)
            .collect()
    }

    pub fn page_numbers(&self) -> Vec<PageToken> {
        page_numbers(self.current_page, self.page_count())
    }

    fn last_page(&self) -> usize {
        self.page_count().max(1)
    }
}

/// Compact page list for pagination controls.
///
/// Up to five pages are listed in full. Beyond that the first and last page
/// are always present and the neighbourhood of `current` is kept, with
/// `Ellipsis` standing in for the gaps.
pub fn page_numbers(current: usize, page_count: usize) -> Vec<PageToken> {
    use PageToken::{Ellipsis, Page};

    if page_count <= COMPACT_AFTER_PAGES {
        return (1..=page_count).map(Page).collect();
    }

    let last = page_count;
    if current <= 3 {
        vec![Page(1), Page(2), Page(3), Page(4), Ellipsis, Page(last)]
    } else if current >= last - 2 {
        vec![
            Page(1),
            Ellipsis,
            Page(last - 3),
            Page(last - 2),
            Page(last - 1),
            Page(last),
        ]
    } else {
        vec![
            Page(1),
            Ellipsis,
            Page(current - 1),
            Page(current),
            Page(current + 1),
            Ellipsis,
            Page(last),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_listings_show_every_page() {
        assert_eq!(
            page_numbers(2, 5),
            vec![
                PageToken::Page(1),
                PageToken::Page(2),
                PageToken::Page(3),
                PageToken::Page(4),
                PageToken::Page(5),
            ]
        );
        assert!(page_numbers(1, 0).is_empty());
    }

    #[test]
    fn zero_page_size_is_bumped() {
        assert_eq!(ListingViewState::with_page_size(0).page_size(), 1);
    }
}
