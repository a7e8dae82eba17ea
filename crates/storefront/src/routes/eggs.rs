//! Hatching egg listings.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Query, State};
use serde::Deserialize;
use tracing::instrument;

use super::views::{EggView, Pagination, Section};
use crate::filters;
use crate::middleware::PageContext;
use crate::state::AppState;

/// Query parameters for the egg listing.
#[derive(Debug, Deserialize)]
pub struct EggsQuery {
    pub page: Option<String>,
}

impl EggsQuery {
    /// Requested page, 1 for anything missing or invalid.
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page
            .as_deref()
            .and_then(|p| p.trim().parse::<u32>().ok())
            .filter(|&p| p > 0)
            .unwrap_or(1)
    }
}

/// Egg listing template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/eggs.html")]
pub struct EggsTemplate {
    pub page: PageContext,
    pub eggs: Section<EggView>,
    pub pagination: Pagination,
}

/// Display a page of egg listings.
#[instrument(skip(state, page))]
pub async fn index(
    State(state): State<AppState>,
    page: PageContext,
    Query(query): Query<EggsQuery>,
) -> EggsTemplate {
    let current = query.page();

    let (eggs, pagination) = match state.catalog().list_eggs(current).await {
        Ok(results) => (
            Section::Ready(results.results.iter().map(EggView::from).collect()),
            Pagination::new(&results, current, page_href),
        ),
        Err(e) => (
            Section::page_failed(&e, "egg listings"),
            Pagination::default(),
        ),
    };

    EggsTemplate {
        page,
        eggs,
        pagination,
    }
}

fn page_href(page: u32) -> String {
    if page <= 1 {
        "/eggs".to_string()
    } else {
        format!("/eggs?page={page}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_defaults_to_first() {
        assert_eq!(EggsQuery { page: None }.page(), 1);
        assert_eq!(EggsQuery { page: Some("0".to_string()) }.page(), 1);
        assert_eq!(EggsQuery { page: Some("abc".to_string()) }.page(), 1);
        assert_eq!(EggsQuery { page: Some("3".to_string()) }.page(), 3);
    }

    #[test]
    fn test_first_page_href_has_no_query() {
        assert_eq!(page_href(1), "/eggs");
        assert_eq!(page_href(2), "/eggs?page=2");
    }
}
