//! Free-text search across listings.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use livestock_core::catalog::{CatalogQuery, keys};
use serde::Deserialize;
use tracing::instrument;

use super::views::{ListingView, Section};
use crate::filters;
use crate::middleware::PageContext;
use crate::state::AppState;

/// Longest accepted search term.
const MAX_QUERY_CHARS: usize = 100;

/// Search query parameters.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

/// Search page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/search.html")]
pub struct SearchTemplate {
    pub page: PageContext,
    pub query: String,
    /// `None` until a term is entered.
    pub results: Option<Section<ListingView>>,
    /// The same term as a catalog filter, for refining.
    pub catalog_href: String,
}

/// Display the search page, with results when `q` is set.
#[instrument(skip(state, page))]
pub async fn search(
    State(state): State<AppState>,
    page: PageContext,
    Query(params): Query<SearchParams>,
) -> SearchTemplate {
    let query: String = params.q.trim().chars().take(MAX_QUERY_CHARS).collect();

    if query.is_empty() {
        return SearchTemplate {
            page,
            query,
            results: None,
            catalog_href: CatalogQuery::default().href(),
        };
    }

    let result = state.catalog().search_livestock(&query).await;
    let catalog_href = CatalogQuery::default()
        .update_params(keys::SEARCH, Some(&query))
        .href();

    SearchTemplate {
        page,
        results: Some(Section::from_result(result, "search results")),
        query,
        catalog_href,
    }
}
