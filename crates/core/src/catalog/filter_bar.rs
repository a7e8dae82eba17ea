//! The floating filter bar shown above catalog results.
//!
//! Everything the bar displays is read from the current [`CatalogQuery`], so
//! the bar, the URL and the catalog request never disagree.

use super::query::{CatalogQuery, CategoryPill, FilterChip, SortOption, keys};

/// Fraction of the viewport height the page must be scrolled past before the
/// bar appears.
pub const VISIBILITY_RATIO: f64 = 0.35;

/// Whether the bar is visible at a given scroll offset. The page's scroll
/// listener applies the same rule with [`VISIBILITY_RATIO`], re-checking on
/// every scroll event rather than latching once shown.
#[must_use]
pub fn is_visible(scroll_y: f64, viewport_height: f64) -> bool {
    scroll_y > viewport_height * VISIBILITY_RATIO
}

/// Render data for the filter bar.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterBar {
    pub search: String,
    pub gender: String,
    pub active_filter_count: usize,
    pub chips: Vec<FilterChip>,
    pub category_pills: Vec<CategoryPill>,
    pub sort_options: Vec<SortOption>,
    /// Link that drops every filter.
    pub clear_href: String,
    pub visibility_ratio: f64,
}

impl FilterBar {
    /// Build the bar for `query`, offering `categories` as pills.
    #[must_use]
    pub fn new<S: AsRef<str>>(query: &CatalogQuery, categories: &[S]) -> Self {
        Self {
            search: query.get(keys::SEARCH).unwrap_or_default().to_owned(),
            gender: query.get(keys::GENDER).unwrap_or_default().to_owned(),
            active_filter_count: query.active_filter_count(),
            chips: query.chips(),
            category_pills: query.category_pills(categories),
            sort_options: query.sort_options(),
            clear_href: query.clear_filters().href(),
            visibility_ratio: VISIBILITY_RATIO,
        }
    }

    #[must_use]
    pub const fn has_active_filters(&self) -> bool {
        self.active_filter_count > 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_follows_scroll_both_ways() {
        let viewport = 1000.0;
        let seen: Vec<bool> = [0.0, 400.0, 0.0]
            .into_iter()
            .map(|scroll_y| is_visible(scroll_y, viewport))
            .collect();
        assert_eq!(seen, [false, true, false]);
    }

    #[test]
    fn test_threshold_is_strictly_greater() {
        assert!(!is_visible(350.0, 1000.0));
        assert!(is_visible(350.5, 1000.0));
    }

    #[test]
    fn test_bar_from_query() {
        let query = CatalogQuery::parse("category=Goats&search=boer");
        let bar = FilterBar::new(&query, &["Goats", "Sheep"]);

        assert_eq!(bar.search, "boer");
        assert_eq!(bar.active_filter_count, 2);
        assert!(bar.has_active_filters());
        assert_eq!(bar.chips.len(), 2);
        assert_eq!(bar.category_pills.len(), 3);
        assert_eq!(bar.sort_options.len(), 2);
        assert_eq!(bar.clear_href, "/livestock");
    }

    #[test]
    fn test_empty_bar() {
        let bar = FilterBar::new::<String>(&CatalogQuery::default(), &[]);
        assert!(!bar.has_active_filters());
        assert!(bar.chips.is_empty());
        assert_eq!(bar.search, "");
    }
}
