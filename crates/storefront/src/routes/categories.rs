//! Category listing page.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use super::views::{CategoryView, Section};
use crate::filters;
use crate::middleware::PageContext;
use crate::state::AppState;

/// Category listing template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/categories.html")]
pub struct CategoriesTemplate {
    pub page: PageContext,
    pub categories: Section<CategoryView>,
}

/// Display every category.
#[instrument(skip(state, page))]
pub async fn index(State(state): State<AppState>, page: PageContext) -> CategoriesTemplate {
    let result = state.catalog().list_categories().await;

    CategoriesTemplate {
        page,
        categories: Section::from_result(result, "categories"),
    }
}
