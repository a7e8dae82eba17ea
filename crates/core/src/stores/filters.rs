//! Catalog filter store.
//!
//! Holds the filter intent for the livestock catalog plus the grid/list display
//! mode. The store is a value container only: prices and free text are kept
//! exactly as given, and callers own any validation.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Store;

/// Catalog ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum SortOrder {
    /// Most recently listed first (`-created_at`).
    #[default]
    #[serde(rename = "-created_at")]
    NewestFirst,
    /// Oldest listings first (`created_at`).
    #[serde(rename = "created_at")]
    OldestFirst,
}

impl SortOrder {
    /// Every ordering the sort selector offers, in display order.
    pub const ALL: [Self; 2] = [Self::NewestFirst, Self::OldestFirst];

    /// Wire value used in the URL and the catalog API.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NewestFirst => "-created_at",
            Self::OldestFirst => "created_at",
        }
    }

    /// Human-readable label for the sort selector.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::NewestFirst => "Newest first",
            Self::OldestFirst => "Oldest first",
        }
    }

    /// Parse a wire value, falling back to newest-first for anything unknown.
    #[must_use]
    pub fn parse(s: &str) -> Self {
        match s.trim() {
            "created_at" => Self::OldestFirst,
            _ => Self::NewestFirst,
        }
    }
}

/// How catalog results are laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    #[default]
    Grid,
    List,
}

impl ViewMode {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Grid => "grid",
            Self::List => "list",
        }
    }

    /// Parse a form value; unknown values yield `None`.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "grid" => Some(Self::Grid),
            "list" => Some(Self::List),
            _ => None,
        }
    }
}

/// The active catalog query.
///
/// `ordering` is always present; every other field is optional and `None`
/// means unconstrained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FilterState {
    pub category: Option<String>,
    pub gender: Option<String>,
    pub is_sold: Option<bool>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub search: Option<String>,
    pub ordering: SortOrder,
}

impl FilterState {
    /// Query parameters for the catalog listing endpoint, constrained fields only.
    ///
    /// Categories are matched by name across the listing's category relation.
    #[must_use]
    pub fn api_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(category) = &self.category {
            params.push(("category__name", category.clone()));
        }
        if let Some(gender) = &self.gender {
            params.push(("gender", gender.clone()));
        }
        if let Some(is_sold) = self.is_sold {
            params.push(("is_sold", is_sold.to_string()));
        }
        if let Some(min) = self.min_price {
            params.push(("min_price", min.to_string()));
        }
        if let Some(max) = self.max_price {
            params.push(("max_price", max.to_string()));
        }
        if let Some(search) = &self.search {
            params.push(("search", search.clone()));
        }
        params.push(("ordering", self.ordering.as_str().to_owned()));
        params
    }
}

/// One field of a [`FilterPatch`].
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum PatchField<T> {
    /// Key not present in the patch: leave the current value.
    #[default]
    Keep,
    /// Key present without a value: unset it.
    Clear,
    /// Key present with a value: overwrite.
    Set(T),
}

impl<T> PatchField<T> {
    fn merge_into(self, slot: &mut Option<T>) {
        match self {
            Self::Keep => {}
            Self::Clear => *slot = None,
            Self::Set(value) => *slot = Some(value),
        }
    }
}

impl<T> From<Option<T>> for PatchField<T> {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Clear, Self::Set)
    }
}

/// A partial update for [`FilterState`].
///
/// Only keys present in the patch change; `ordering` can be replaced but never
/// unset.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterPatch {
    pub category: PatchField<String>,
    pub gender: PatchField<String>,
    pub is_sold: PatchField<bool>,
    pub min_price: PatchField<Decimal>,
    pub max_price: PatchField<Decimal>,
    pub search: PatchField<String>,
    pub ordering: Option<SortOrder>,
}

/// Filter store: catalog filter intent and display mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FilterStore {
    filters: FilterState,
    view_mode: ViewMode,
}

/// Mutations accepted by [`FilterStore`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterAction {
    SetFilters(FilterPatch),
    ClearFilters,
    SetViewMode(ViewMode),
}

impl FilterStore {
    /// Start from existing filter intent (typically derived from the URL).
    #[must_use]
    pub fn with_filters(filters: FilterState, view_mode: ViewMode) -> Self {
        Self { filters, view_mode }
    }

    #[must_use]
    pub const fn filters(&self) -> &FilterState {
        &self.filters
    }

    #[must_use]
    pub const fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    /// Shallow-merge `patch` into the current filters.
    pub fn set_filters(&mut self, patch: FilterPatch) {
        let FilterPatch {
            category,
            gender,
            is_sold,
            min_price,
            max_price,
            search,
            ordering,
        } = patch;

        category.merge_into(&mut self.filters.category);
        gender.merge_into(&mut self.filters.gender);
        is_sold.merge_into(&mut self.filters.is_sold);
        min_price.merge_into(&mut self.filters.min_price);
        max_price.merge_into(&mut self.filters.max_price);
        search.merge_into(&mut self.filters.search);
        if let Some(ordering) = ordering {
            self.filters.ordering = ordering;
        }
    }

    /// Reset filters to their defaults. The display mode is not a filter and
    /// is left alone.
    pub fn clear_filters(&mut self) {
        self.filters = FilterState::default();
    }

    pub const fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }
}

impl Store for FilterStore {
    type Action = FilterAction;

    fn apply(&mut self, action: FilterAction) {
        match action {
            FilterAction::SetFilters(patch) => self.set_filters(patch),
            FilterAction::ClearFilters => self.clear_filters(),
            FilterAction::SetViewMode(mode) => self.set_view_mode(mode),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set<T>(value: T) -> PatchField<T> {
        PatchField::Set(value)
    }

    #[test]
    fn test_default_state_is_unconstrained_newest_first() {
        let store = FilterStore::default();
        assert_eq!(store.filters().category, None);
        assert_eq!(store.filters().search, None);
        assert_eq!(store.filters().ordering, SortOrder::NewestFirst);
        assert_eq!(store.view_mode(), ViewMode::Grid);
    }

    #[test]
    fn test_set_filters_only_touches_present_keys() {
        let mut store = FilterStore::default();
        store.set_filters(FilterPatch {
            category: set("Goats".to_owned()),
            search: set("nubian".to_owned()),
            ..FilterPatch::default()
        });
        store.set_filters(FilterPatch {
            gender: set("female".to_owned()),
            ..FilterPatch::default()
        });

        let filters = store.filters();
        assert_eq!(filters.category.as_deref(), Some("Goats"));
        assert_eq!(filters.search.as_deref(), Some("nubian"));
        assert_eq!(filters.gender.as_deref(), Some("female"));
    }

    #[test]
    fn test_set_filters_is_left_fold_of_shallow_merges() {
        let patches = vec![
            FilterPatch {
                category: set("Sheep".to_owned()),
                min_price: set(Decimal::new(100, 0)),
                ..FilterPatch::default()
            },
            FilterPatch {
                category: set("Cattle".to_owned()),
                is_sold: set(false),
                ..FilterPatch::default()
            },
            FilterPatch {
                min_price: PatchField::Clear,
                ordering: Some(SortOrder::OldestFirst),
                ..FilterPatch::default()
            },
        ];

        let mut store = FilterStore::default();
        for patch in patches {
            store.apply(FilterAction::SetFilters(patch));
        }

        let expected = FilterState {
            category: Some("Cattle".to_owned()),
            is_sold: Some(false),
            min_price: None,
            ordering: SortOrder::OldestFirst,
            ..FilterState::default()
        };
        assert_eq!(store.filters(), &expected);
    }

    #[test]
    fn test_set_filters_does_not_validate() {
        let mut store = FilterStore::default();
        store.set_filters(FilterPatch {
            min_price: set(Decimal::new(500, 0)),
            max_price: set(Decimal::new(10, 0)),
            search: set("   ".to_owned()),
            ..FilterPatch::default()
        });

        assert_eq!(store.filters().min_price, Some(Decimal::new(500, 0)));
        assert_eq!(store.filters().max_price, Some(Decimal::new(10, 0)));
        assert_eq!(store.filters().search.as_deref(), Some("   "));
    }

    #[test]
    fn test_clear_filters_always_yields_default() {
        let mut store = FilterStore::default();
        store.set_view_mode(ViewMode::List);
        store.set_filters(FilterPatch {
            category: set("Poultry".to_owned()),
            gender: set("male".to_owned()),
            is_sold: set(true),
            min_price: set(Decimal::new(5, 0)),
            max_price: set(Decimal::new(50, 0)),
            search: set("silkie".to_owned()),
            ordering: Some(SortOrder::OldestFirst),
        });

        store.apply(FilterAction::ClearFilters);

        assert_eq!(store.filters(), &FilterState::default());
        assert_eq!(store.view_mode(), ViewMode::List);
    }

    #[test]
    fn test_patch_field_from_option() {
        assert_eq!(PatchField::from(Some(3)), PatchField::Set(3));
        assert_eq!(PatchField::<i32>::from(None), PatchField::Clear);
    }

    #[test]
    fn test_sort_order_parse_falls_back_to_newest() {
        assert_eq!(SortOrder::parse("created_at"), SortOrder::OldestFirst);
        assert_eq!(SortOrder::parse("-created_at"), SortOrder::NewestFirst);
        assert_eq!(SortOrder::parse("price"), SortOrder::NewestFirst);
    }

    #[test]
    fn test_sort_order_serializes_to_wire_value() {
        let json = serde_json::to_string(&SortOrder::NewestFirst).unwrap_or_default();
        assert_eq!(json, "\"-created_at\"");
    }

    #[test]
    fn test_api_params_include_ordering_and_constrained_fields() {
        let filters = FilterState {
            category: Some("Goats".to_owned()),
            is_sold: Some(false),
            ..FilterState::default()
        };
        assert_eq!(
            filters.api_params(),
            vec![
                ("category__name", "Goats".to_owned()),
                ("is_sold", "false".to_owned()),
                ("ordering", "-created_at".to_owned()),
            ]
        );
    }
}
