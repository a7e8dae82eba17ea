//! Livestock catalog: listing page, filter form and display mode.
//!
//! The URL query string is the canonical filter state. Every request rebuilds
//! a [`FilterStore`] from it; filter form posts apply a [`FilterPatch`] to
//! that store and redirect to the URL of the result.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{RawQuery, State},
    response::Redirect,
};
use livestock_core::catalog::{CatalogQuery, FilterBar};
use livestock_core::stores::{
    FilterAction, FilterPatch, FilterStore, ModalStore, PatchField, SortOrder, Store, ViewMode,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use super::views::{ListingView, Pagination, Section};
use crate::error::add_breadcrumb;
use crate::filters;
use crate::middleware::{PageContext, load_store};
use crate::models::session_keys;
use crate::state::AppState;

/// Catalog page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/catalog.html")]
pub struct CatalogTemplate {
    pub page: PageContext,
    pub bar: FilterBar,
    pub view_mode: ViewMode,
    pub listings: Section<ListingView>,
    pub pagination: Pagination,
    /// Current query string, carried through the filter forms.
    pub query: String,
    /// Listing to reopen in the detail modal after a reload.
    pub open_modal_href: Option<String>,
}

impl CatalogTemplate {
    #[must_use]
    pub fn is_list(&self) -> bool {
        self.view_mode == ViewMode::List
    }

    /// Result count line, once results are in.
    #[must_use]
    pub fn results_label(&self) -> Option<String> {
        if self.listings.is_loading() || self.listings.error().is_some() {
            return None;
        }
        Some(match self.pagination.total {
            1 => "1 animal found".to_string(),
            n => format!("{n} animals found"),
        })
    }
}

/// Filter form. Fields left out of the form are left as they are; fields
/// submitted empty are cleared.
#[derive(Debug, Default, Deserialize)]
pub struct FilterForm {
    /// Query string the form was rendered for.
    #[serde(default)]
    pub query: String,
    pub category: Option<String>,
    pub gender: Option<String>,
    pub is_sold: Option<String>,
    pub min_price: Option<String>,
    pub max_price: Option<String>,
    pub search: Option<String>,
    pub sort: Option<String>,
    /// Any value resets every filter.
    pub clear: Option<String>,
}

impl FilterForm {
    /// The store mutation this submission asks for.
    #[must_use]
    pub fn action(self) -> FilterAction {
        if self.clear.is_some() {
            return FilterAction::ClearFilters;
        }

        FilterAction::SetFilters(FilterPatch {
            category: text_field(self.category),
            gender: text_field(self.gender),
            is_sold: parsed_field(self.is_sold, parse_bool),
            min_price: parsed_field(self.min_price, |s| s.parse::<Decimal>().ok()),
            max_price: parsed_field(self.max_price, |s| s.parse::<Decimal>().ok()),
            search: text_field(self.search),
            ordering: self
                .sort
                .as_deref()
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(SortOrder::parse),
        })
    }
}

/// Display-mode form.
#[derive(Debug, Deserialize)]
pub struct ViewModeForm {
    pub mode: String,
    #[serde(default)]
    pub query: String,
}

/// Display the catalog.
#[instrument(skip(state, page, session))]
pub async fn index(
    State(state): State<AppState>,
    page: PageContext,
    session: Session,
    RawQuery(raw): RawQuery,
) -> CatalogTemplate {
    let query = CatalogQuery::parse(raw.as_deref().unwrap_or_default());
    let store = FilterStore::with_filters(query.filters(), load_view_mode(&session).await);
    let current_page = query.page();

    let (categories, listings) = tokio::join!(
        state.catalog().list_categories(),
        state.catalog().list_livestock(store.filters(), current_page),
    );

    // Pills degrade to just "All" when categories are unavailable
    let category_names: Vec<String> = match categories {
        Ok(categories) => categories.into_iter().map(|c| c.name).collect(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to load categories for filter bar");
            Vec::new()
        }
    };

    let (listings, pagination) = match listings {
        Ok(results) => (
            Section::Ready(results.results.iter().map(ListingView::from).collect()),
            Pagination::new(&results, current_page, |p| query.with_page(p).href()),
        ),
        Err(e) => (
            Section::page_failed(&e, "catalog listings"),
            Pagination::default(),
        ),
    };

    let modal: ModalStore = load_store(&session).await;

    CatalogTemplate {
        page,
        bar: FilterBar::new(&query, &category_names),
        view_mode: store.view_mode(),
        listings,
        pagination,
        query: query.to_query_string(),
        open_modal_href: modal
            .selected_id()
            .map(|id| format!("/livestock/{id}/modal")),
    }
}

/// Apply a filter form and redirect to the resulting catalog URL.
#[instrument(skip(session))]
pub async fn apply_filters(session: Session, Form(form): Form<FilterForm>) -> Redirect {
    let current = CatalogQuery::parse(&form.query);
    let mut store = FilterStore::with_filters(current.filters(), load_view_mode(&session).await);

    let next = next_query(&current, &mut store, form.action());
    let query_string = next.to_query_string();
    add_breadcrumb("catalog", "Applied filters", Some(&[("query", query_string.as_str())]));

    Redirect::to(&next.href())
}

/// Switch between grid and list layouts.
#[instrument(skip(session))]
pub async fn set_view_mode(session: Session, Form(form): Form<ViewModeForm>) -> Redirect {
    let query = CatalogQuery::parse(&form.query);

    if let Some(mode) = ViewMode::parse(form.mode.trim()) {
        let mut store = FilterStore::with_filters(query.filters(), load_view_mode(&session).await);
        store.apply(FilterAction::SetViewMode(mode));
        if let Err(e) = session
            .insert(session_keys::VIEW_MODE, store.view_mode())
            .await
        {
            tracing::warn!(error = %e, "Failed to save view mode");
        }
    }

    Redirect::to(&query.href())
}

/// Apply `action` and work out the catalog query it leads to. Clearing drops
/// every parameter; other changes keep parameters the filters don't own.
fn next_query(
    current: &CatalogQuery,
    store: &mut FilterStore,
    action: FilterAction,
) -> CatalogQuery {
    let clearing = matches!(action, FilterAction::ClearFilters);
    store.apply(action);
    if clearing {
        current.clear_filters()
    } else {
        current.with_filters(store.filters())
    }
}

/// Display mode saved for this visit, grid by default.
async fn load_view_mode(session: &Session) -> ViewMode {
    session
        .get::<ViewMode>(session_keys::VIEW_MODE)
        .await
        .ok()
        .flatten()
        .unwrap_or_default()
}

fn text_field(value: Option<String>) -> PatchField<String> {
    parsed_field(value, |s| Some(s.to_owned()))
}

/// Absent → keep, blank → clear, otherwise parse. Values that don't parse
/// leave the current filter untouched.
fn parsed_field<T>(value: Option<String>, parse: impl FnOnce(&str) -> Option<T>) -> PatchField<T> {
    let Some(value) = value else {
        return PatchField::Keep;
    };
    let value = value.trim();
    if value.is_empty() {
        return PatchField::Clear;
    }
    parse(value).map_or(PatchField::Keep, PatchField::Set)
}

fn parse_bool(value: &str) -> Option<bool> {
    match value {
        "true" | "1" | "on" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use livestock_core::stores::FilterState;

    use super::*;

    fn apply(query: &str, form: FilterForm) -> String {
        let current = CatalogQuery::parse(query);
        let mut store = FilterStore::with_filters(current.filters(), ViewMode::Grid);
        next_query(&current, &mut store, form.action()).href()
    }

    #[test]
    fn test_absent_fields_are_kept() {
        let href = apply(
            "category=Goats&search=boer",
            FilterForm {
                gender: Some("female".to_string()),
                ..FilterForm::default()
            },
        );
        let query = CatalogQuery::parse(href.trim_start_matches("/livestock?"));
        assert_eq!(query.get("category"), Some("Goats"));
        assert_eq!(query.get("search"), Some("boer"));
        assert_eq!(query.get("gender"), Some("female"));
    }

    #[test]
    fn test_blank_field_clears() {
        let href = apply(
            "category=Goats&search=boer",
            FilterForm {
                search: Some("  ".to_string()),
                ..FilterForm::default()
            },
        );
        assert_eq!(href, "/livestock?category=Goats");
    }

    #[test]
    fn test_clear_resets_everything() {
        let href = apply(
            "category=Goats&sort=created_at&page=3",
            FilterForm {
                clear: Some("1".to_string()),
                ..FilterForm::default()
            },
        );
        assert_eq!(href, "/livestock");
    }

    #[test]
    fn test_filter_change_drops_page() {
        let href = apply(
            "category=Goats&page=4",
            FilterForm {
                sort: Some("created_at".to_string()),
                ..FilterForm::default()
            },
        );
        assert!(!href.contains("page="));
        assert!(href.contains("sort=created_at"));
    }

    #[test]
    fn test_unrelated_parameters_survive_a_filter_change() {
        let href = apply(
            "utm_source=mail&category=Goats",
            FilterForm {
                search: Some("boer".to_string()),
                ..FilterForm::default()
            },
        );
        assert_eq!(href, "/livestock?utm_source=mail&category=Goats&search=boer");
    }

    #[test]
    fn test_unparsable_price_keeps_current() {
        let action = FilterForm {
            min_price: Some("cheap".to_string()),
            max_price: Some("500".to_string()),
            ..FilterForm::default()
        }
        .action();

        let mut store = FilterStore::with_filters(
            FilterState {
                min_price: Some(Decimal::new(100, 0)),
                ..FilterState::default()
            },
            ViewMode::Grid,
        );
        store.apply(action);
        assert_eq!(store.filters().min_price, Some(Decimal::new(100, 0)));
        assert_eq!(store.filters().max_price, Some(Decimal::new(500, 0)));
    }

    #[test]
    fn test_parse_bool() {
        assert_eq!(parse_bool("on"), Some(true));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }
}
