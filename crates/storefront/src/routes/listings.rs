//! Listing detail page and the detail modal.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use livestock_core::LivestockId;
use livestock_core::stores::{ModalAction, ModalStore};
use tower_sessions::Session;
use tracing::instrument;

use super::views::ListingView;
use crate::api::ApiError;
use crate::error::AppError;
use crate::filters;
use crate::middleware::{PageContext, dispatch};
use crate::state::AppState;

/// Listing detail page template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/listing.html")]
pub struct ListingTemplate {
    pub page: PageContext,
    pub listing: ListingView,
}

/// Full-page error template.
#[derive(Template, WebTemplate)]
#[template(path = "pages/error.html")]
pub struct ErrorTemplate {
    pub page: PageContext,
    pub title: String,
    pub message: String,
    /// Where the retry link points, if retrying makes sense.
    pub retry_href: Option<String>,
}

/// Detail modal fragment.
#[derive(Template, WebTemplate)]
#[template(path = "partials/modal.html")]
pub struct ModalTemplate {
    pub listing: Option<ListingView>,
    pub error: Option<String>,
    /// Fragment URL, for the retry control.
    pub modal_href: String,
}

/// Display a single listing.
///
/// Missing listings are a 404. A throttled API is a 503 and any other
/// failure a 502, both with a retry link.
#[instrument(skip(state, page))]
pub async fn show(
    State(state): State<AppState>,
    page: PageContext,
    Path(id): Path<LivestockId>,
) -> Response {
    match state.catalog().get_livestock(id).await {
        Ok(listing) => ListingTemplate {
            page,
            listing: ListingView::from(&listing),
        }
        .into_response(),
        Err(ApiError::NotFound(_)) => (
            StatusCode::NOT_FOUND,
            ErrorTemplate {
                page,
                title: "Listing not found".to_string(),
                message: "This animal may have been sold or removed.".to_string(),
                retry_href: None,
            },
        )
            .into_response(),
        Err(e) => {
            tracing::error!(error = %e, livestock_id = %id, "Failed to load listing");
            let message = e.user_message().to_string();
            (
                AppError::Api(e).status(),
                ErrorTemplate {
                    page,
                    title: "Something went wrong".to_string(),
                    message,
                    retry_href: Some(format!("/livestock/{id}")),
                },
            )
                .into_response()
        }
    }
}

/// Open the detail modal for a listing (HTMX fragment).
///
/// The modal state is recorded before the listing is fetched, so a reload
/// reopens it after a transient failure. A listing that no longer exists
/// closes it again.
#[instrument(skip(state, session))]
pub async fn open_modal(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<LivestockId>,
) -> ModalTemplate {
    dispatch::<ModalStore>(&session, ModalAction::OpenDetailModal(id)).await;

    let modal_href = format!("/livestock/{id}/modal");
    match state.catalog().get_livestock(id).await {
        Ok(listing) => ModalTemplate {
            listing: Some(ListingView::from(&listing)),
            error: None,
            modal_href,
        },
        Err(e) => {
            if matches!(e, ApiError::NotFound(_)) {
                dispatch::<ModalStore>(&session, ModalAction::CloseDetailModal).await;
            } else {
                tracing::error!(error = %e, livestock_id = %id, "Failed to load listing for modal");
            }
            ModalTemplate {
                listing: None,
                error: Some(e.user_message().to_string()),
                modal_href,
            }
        }
    }
}

/// Close the detail modal. The empty body replaces the modal element.
#[instrument(skip(session))]
pub async fn close_modal(session: Session) -> Html<&'static str> {
    dispatch::<ModalStore>(&session, ModalAction::CloseDetailModal).await;
    Html("")
}
