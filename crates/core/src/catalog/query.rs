//! The catalog query string.
//!
//! The URL is the canonical home of the visitor's filter intent: every catalog
//! link and redirect is built by editing a [`CatalogQuery`], and the
//! [`FilterState`] used to query the catalog API is derived from it.

use rust_decimal::Decimal;
use url::form_urlencoded;

use crate::stores::{FilterState, SortOrder};

/// Path of the catalog page.
pub const CATALOG_PATH: &str = "/livestock";

/// Recognized query parameter names.
pub mod keys {
    pub const CATEGORY: &str = "category";
    pub const SORT: &str = "sort";
    pub const SEARCH: &str = "search";
    pub const GENDER: &str = "gender";
    pub const IS_SOLD: &str = "is_sold";
    pub const MIN_PRICE: &str = "min_price";
    pub const MAX_PRICE: &str = "max_price";
    pub const PAGE: &str = "page";
}

/// Keys that count towards the active-filter badge.
const COUNTED_KEYS: [&str; 3] = [keys::CATEGORY, keys::SEARCH, keys::GENDER];

/// Keys owned by [`FilterState`].
const FILTER_KEYS: [&str; 7] = [
    keys::CATEGORY,
    keys::GENDER,
    keys::IS_SOLD,
    keys::MIN_PRICE,
    keys::MAX_PRICE,
    keys::SEARCH,
    keys::SORT,
];

/// An ordered set of catalog query parameters.
///
/// Empty values are dropped on the way in, so "present" always means
/// "present and non-empty". Unrecognized keys are carried along untouched.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CatalogQuery {
    pairs: Vec<(String, String)>,
}

/// A dismissible chip for one active filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterChip {
    /// Parameter the chip represents.
    pub key: &'static str,
    /// Short kind label, e.g. "Search".
    pub kind: &'static str,
    /// The filter value.
    pub value: String,
    /// Catalog URL with only this parameter removed.
    pub remove_href: String,
}

/// A selectable category pill.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryPill {
    pub label: String,
    pub href: String,
    pub active: bool,
}

/// One entry of the sort selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SortOption {
    pub value: &'static str,
    pub label: &'static str,
    pub href: String,
    pub selected: bool,
}

impl CatalogQuery {
    /// Parse a raw query string, with or without the leading `?`.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let raw = raw.strip_prefix('?').unwrap_or(raw);
        let pairs = form_urlencoded::parse(raw.as_bytes())
            .filter(|(_, value)| !value.trim().is_empty())
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect();
        Self { pairs }
    }

    /// Build the query that represents `filters`. The default ordering is
    /// left implicit.
    #[must_use]
    pub fn from_filters(filters: &FilterState) -> Self {
        let mut pairs = Vec::new();
        let mut push = |key: &str, value: Option<String>| {
            if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
                pairs.push((key.to_owned(), value));
            }
        };

        push(keys::CATEGORY, filters.category.clone());
        push(keys::GENDER, filters.gender.clone());
        push(keys::IS_SOLD, filters.is_sold.map(|b| b.to_string()));
        push(keys::MIN_PRICE, filters.min_price.map(|p| p.to_string()));
        push(keys::MAX_PRICE, filters.max_price.map(|p| p.to_string()));
        push(keys::SEARCH, filters.search.clone());
        if filters.ordering != SortOrder::default() {
            push(keys::SORT, Some(filters.ordering.as_str().to_owned()));
        }

        Self { pairs }
    }

    /// Replace the filter parameters with `filters`, keeping every other
    /// parameter where it was. The page number is dropped.
    #[must_use]
    pub fn with_filters(&self, filters: &FilterState) -> Self {
        let mut pairs: Vec<(String, String)> = self
            .pairs
            .iter()
            .filter(|(k, _)| k != keys::PAGE && !FILTER_KEYS.contains(&k.as_str()))
            .cloned()
            .collect();
        pairs.extend(Self::from_filters(filters).pairs);
        Self { pairs }
    }

    /// First value for `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Set `key` to `value`, or remove it when `value` is `None` or empty.
    ///
    /// Changing anything other than the page number sends the visitor back to
    /// the first page of results.
    #[must_use]
    pub fn update_params(&self, key: &str, value: Option<&str>) -> Self {
        let value = value.map(str::trim).filter(|v| !v.is_empty());
        let mut pairs = self.pairs.clone();

        if key != keys::PAGE {
            pairs.retain(|(k, _)| k != keys::PAGE);
        }

        match value {
            Some(value) => {
                if let Some(index) = pairs.iter().position(|(k, _)| k == key) {
                    let mut seen = false;
                    pairs.retain(|(k, _)| {
                        if k != key {
                            return true;
                        }
                        let keep = !seen;
                        seen = true;
                        keep
                    });
                    if let Some(slot) = pairs.get_mut(index) {
                        slot.1 = value.to_owned();
                    }
                } else {
                    pairs.push((key.to_owned(), value.to_owned()));
                }
            }
            None => pairs.retain(|(k, _)| k != key),
        }

        Self { pairs }
    }

    /// Drop every parameter at once.
    #[must_use]
    pub fn clear_filters(&self) -> Self {
        Self::default()
    }

    /// Jump to a page of results; page 1 is implicit.
    #[must_use]
    pub fn with_page(&self, page: u32) -> Self {
        if page <= 1 {
            self.update_params(keys::PAGE, None)
        } else {
            self.update_params(keys::PAGE, Some(&page.to_string()))
        }
    }

    /// Requested page, 1-based.
    #[must_use]
    pub fn page(&self) -> u32 {
        self.get(keys::PAGE)
            .and_then(|p| p.parse::<u32>().ok())
            .filter(|p| *p >= 1)
            .unwrap_or(1)
    }

    #[must_use]
    pub fn sort(&self) -> SortOrder {
        self.get(keys::SORT).map_or_else(SortOrder::default, SortOrder::parse)
    }

    /// URL-encoded query string without the leading `?`.
    #[must_use]
    pub fn to_query_string(&self) -> String {
        form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish()
    }

    /// Catalog path plus query string, or the bare path when nothing is set.
    #[must_use]
    pub fn href(&self) -> String {
        if self.pairs.is_empty() {
            CATALOG_PATH.to_owned()
        } else {
            format!("{CATALOG_PATH}?{}", self.to_query_string())
        }
    }

    /// Number of active filters among category, free-text search and gender.
    #[must_use]
    pub fn active_filter_count(&self) -> usize {
        COUNTED_KEYS
            .iter()
            .filter(|key| self.get(key).is_some())
            .count()
    }

    /// Chips for the active search and category filters.
    #[must_use]
    pub fn chips(&self) -> Vec<FilterChip> {
        [(keys::SEARCH, "Search"), (keys::CATEGORY, "Category")]
            .into_iter()
            .filter_map(|(key, kind)| {
                self.get(key).map(|value| FilterChip {
                    key,
                    kind,
                    value: value.to_owned(),
                    remove_href: self.update_params(key, None).href(),
                })
            })
            .collect()
    }

    /// "All" followed by one pill per category name.
    #[must_use]
    pub fn category_pills<S: AsRef<str>>(&self, categories: &[S]) -> Vec<CategoryPill> {
        let current = self.get(keys::CATEGORY);
        let mut pills = Vec::with_capacity(categories.len() + 1);
        pills.push(CategoryPill {
            label: "All".to_owned(),
            href: self.update_params(keys::CATEGORY, None).href(),
            active: current.is_none(),
        });
        pills.extend(categories.iter().map(|name| {
            let name = name.as_ref();
            CategoryPill {
                label: name.to_owned(),
                href: self.update_params(keys::CATEGORY, Some(name)).href(),
                active: current == Some(name),
            }
        }));
        pills
    }

    /// The two orderings offered by the sort selector.
    #[must_use]
    pub fn sort_options(&self) -> Vec<SortOption> {
        let current = self.sort();
        SortOrder::ALL
            .into_iter()
            .map(|order| SortOption {
                value: order.as_str(),
                label: order.label(),
                href: self.update_params(keys::SORT, Some(order.as_str())).href(),
                selected: order == current,
            })
            .collect()
    }

    /// Filter intent carried by this query.
    #[must_use]
    pub fn filters(&self) -> FilterState {
        FilterState::from(self)
    }
}

impl From<&CatalogQuery> for FilterState {
    fn from(query: &CatalogQuery) -> Self {
        let text = |key: &str| query.get(key).map(str::to_owned);
        let decimal = |key: &str| query.get(key).and_then(|v| v.parse::<Decimal>().ok());

        Self {
            category: text(keys::CATEGORY),
            gender: text(keys::GENDER),
            is_sold: query.get(keys::IS_SOLD).and_then(|v| match v {
                "true" | "1" => Some(true),
                "false" | "0" => Some(false),
                _ => None,
            }),
            min_price: decimal(keys::MIN_PRICE),
            max_price: decimal(keys::MAX_PRICE),
            search: text(keys::SEARCH),
            ordering: query.sort(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_update_params_set_then_remove() {
        let query = CatalogQuery::default();
        assert_eq!(query.to_query_string(), "");

        let query = query.update_params("category", Some("Goats"));
        assert_eq!(query.to_query_string(), "category=Goats");
        assert_eq!(query.href(), "/livestock?category=Goats");

        let query = query.update_params("category", None);
        assert_eq!(query.to_query_string(), "");
        assert_eq!(query.href(), "/livestock");
    }

    #[test]
    fn test_update_params_replaces_in_place() {
        let query = CatalogQuery::parse("?category=Sheep&search=dorper");
        let query = query.update_params("category", Some("Goats"));
        assert_eq!(query.to_query_string(), "category=Goats&search=dorper");
    }

    #[test]
    fn test_update_params_collapses_duplicates() {
        let query = CatalogQuery::parse("gender=male&gender=female");
        let query = query.update_params("gender", Some("female"));
        assert_eq!(query.to_query_string(), "gender=female");
    }

    #[test]
    fn test_update_params_empty_value_removes() {
        let query = CatalogQuery::parse("search=boer");
        assert!(query.update_params("search", Some("  ")).is_empty());
    }

    #[test]
    fn test_filter_change_resets_page() {
        let query = CatalogQuery::parse("category=Cattle&page=3");
        assert_eq!(query.page(), 3);
        let query = query.update_params("gender", Some("female"));
        assert_eq!(query.page(), 1);
        assert_eq!(query.get("page"), None);
    }

    #[test]
    fn test_with_page_keeps_filters() {
        let query = CatalogQuery::parse("category=Cattle").with_page(2);
        assert_eq!(query.to_query_string(), "category=Cattle&page=2");
        assert_eq!(query.with_page(1).to_query_string(), "category=Cattle");
    }

    #[test]
    fn test_parse_drops_empty_values_and_decodes() {
        let query = CatalogQuery::parse("search=dairy+goat&gender=&category=Goats%20%26%20Kids");
        assert_eq!(query.get("search"), Some("dairy goat"));
        assert_eq!(query.get("gender"), None);
        assert_eq!(query.get("category"), Some("Goats & Kids"));
    }

    #[test]
    fn test_unknown_keys_are_preserved() {
        let query = CatalogQuery::parse("utm_source=mail&category=Goats");
        let query = query.update_params("category", None);
        assert_eq!(query.to_query_string(), "utm_source=mail");
    }

    #[test]
    fn test_clear_filters_yields_bare_path() {
        let query = CatalogQuery::parse("category=Goats&search=x&gender=male&sort=created_at");
        assert_eq!(query.clear_filters().href(), "/livestock");
    }

    #[test]
    fn test_active_filter_count_counts_category_search_gender_only() {
        assert_eq!(CatalogQuery::default().active_filter_count(), 0);
        let query = CatalogQuery::parse("category=Goats&sort=created_at&is_sold=false&page=2");
        assert_eq!(query.active_filter_count(), 1);
        let query = CatalogQuery::parse("category=Goats&search=boer&gender=male&min_price=10");
        assert_eq!(query.active_filter_count(), 3);
    }

    #[test]
    fn test_chips_remove_only_their_own_parameter() {
        let query = CatalogQuery::parse("category=Goats&search=boer&gender=male");
        let chips = query.chips();
        assert_eq!(chips.len(), 2);

        let search = chips.iter().find(|c| c.key == "search");
        assert_eq!(
            search.map(|c| c.remove_href.as_str()),
            Some("/livestock?category=Goats&gender=male")
        );
        let category = chips.iter().find(|c| c.key == "category");
        assert_eq!(
            category.map(|c| c.remove_href.as_str()),
            Some("/livestock?search=boer&gender=male")
        );
    }

    #[test]
    fn test_no_chips_without_filters() {
        assert!(CatalogQuery::parse("gender=male").chips().is_empty());
    }

    #[test]
    fn test_category_pills() {
        let query = CatalogQuery::parse("category=Sheep&search=x");
        let pills = query.category_pills(&["Goats", "Sheep"]);

        let labels: Vec<&str> = pills.iter().map(|p| p.label.as_str()).collect();
        assert_eq!(labels, vec!["All", "Goats", "Sheep"]);
        assert!(!pills[0].active);
        assert!(pills[2].active);
        assert_eq!(pills[0].href, "/livestock?search=x");
        assert_eq!(pills[1].href, "/livestock?category=Goats&search=x");
    }

    #[test]
    fn test_all_pill_active_without_category() {
        let pills = CatalogQuery::default().category_pills::<&str>(&[]);
        assert_eq!(pills.len(), 1);
        assert!(pills[0].active);
        assert_eq!(pills[0].href, "/livestock");
    }

    #[test]
    fn test_sort_options_are_exactly_two() {
        let options = CatalogQuery::parse("sort=created_at").sort_options();
        let values: Vec<&str> = options.iter().map(|o| o.value).collect();
        assert_eq!(values, vec!["-created_at", "created_at"]);
        assert!(!options[0].selected);
        assert!(options[1].selected);
        assert_eq!(options[0].href, "/livestock?sort=-created_at");
    }

    #[test]
    fn test_filters_derived_from_query() {
        let query = CatalogQuery::parse(
            "category=Goats&gender=female&is_sold=false&min_price=100&max_price=abc&search=nubian&sort=created_at",
        );
        let filters = query.filters();
        assert_eq!(filters.category.as_deref(), Some("Goats"));
        assert_eq!(filters.gender.as_deref(), Some("female"));
        assert_eq!(filters.is_sold, Some(false));
        assert_eq!(filters.min_price, Some(Decimal::new(100, 0)));
        assert_eq!(filters.max_price, None);
        assert_eq!(filters.search.as_deref(), Some("nubian"));
        assert_eq!(filters.ordering, SortOrder::OldestFirst);
    }

    #[test]
    fn test_from_filters_round_trips_through_url() {
        let filters = FilterState {
            category: Some("Poultry".to_owned()),
            is_sold: Some(true),
            search: Some("silkie bantam".to_owned()),
            ordering: SortOrder::OldestFirst,
            ..FilterState::default()
        };
        let query = CatalogQuery::from_filters(&filters);
        assert_eq!(
            query.to_query_string(),
            "category=Poultry&is_sold=true&search=silkie+bantam&sort=created_at"
        );
        assert_eq!(CatalogQuery::parse(&query.to_query_string()).filters(), filters);
    }

    #[test]
    fn test_with_filters_keeps_unrecognized_keys() {
        let query = CatalogQuery::parse("utm_source=mail&category=Goats&page=2");
        let filters = FilterState {
            category: Some("Goats".to_owned()),
            search: Some("boer".to_owned()),
            ..FilterState::default()
        };

        assert_eq!(
            query.with_filters(&filters).to_query_string(),
            "utm_source=mail&category=Goats&search=boer"
        );
        assert_eq!(
            query.with_filters(&FilterState::default()).href(),
            "/livestock?utm_source=mail"
        );
    }

    #[test]
    fn test_default_ordering_left_out_of_url() {
        assert!(CatalogQuery::from_filters(&FilterState::default()).is_empty());
    }
}
