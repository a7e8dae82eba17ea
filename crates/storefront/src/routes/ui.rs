//! Sidebar and mobile menu controls.
//!
//! These are plain form posts that redirect back to the page they came from.
//! Sidebar changes are written to the preference cookie; the mobile menu flag
//! only lives in the session.

use axum::{
    Form,
    extract::State,
    http::header::SET_COOKIE,
    response::{IntoResponse, Redirect, Response},
};
use livestock_core::stores::{Store, UiAction};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::middleware::{UiPreferences, preferences_cookie, save_mobile_menu};
use crate::state::AppState;

/// Form carrying the page to return to.
#[derive(Debug, Default, Deserialize)]
pub struct ReturnForm {
    pub return_to: Option<String>,
}

impl ReturnForm {
    /// Local path to redirect to; anything else falls back to the home page.
    #[must_use]
    pub fn target(&self) -> &str {
        self.return_to
            .as_deref()
            .filter(|path| is_local_path(path))
            .unwrap_or("/")
    }
}

#[instrument(skip(state, prefs))]
pub async fn toggle_sidebar(
    State(state): State<AppState>,
    prefs: UiPreferences,
    Form(form): Form<ReturnForm>,
) -> Response {
    update_sidebar(&state, prefs, UiAction::ToggleSidebar, &form)
}

#[instrument(skip(state, prefs))]
pub async fn open_sidebar(
    State(state): State<AppState>,
    prefs: UiPreferences,
    Form(form): Form<ReturnForm>,
) -> Response {
    update_sidebar(&state, prefs, UiAction::OpenSidebar, &form)
}

#[instrument(skip(state, prefs))]
pub async fn close_sidebar(
    State(state): State<AppState>,
    prefs: UiPreferences,
    Form(form): Form<ReturnForm>,
) -> Response {
    update_sidebar(&state, prefs, UiAction::CloseSidebar, &form)
}

#[instrument(skip(session))]
pub async fn open_mobile_menu(session: Session, Form(form): Form<ReturnForm>) -> Redirect {
    save_mobile_menu(&session, true).await;
    Redirect::to(form.target())
}

#[instrument(skip(session))]
pub async fn close_mobile_menu(session: Session, Form(form): Form<ReturnForm>) -> Redirect {
    save_mobile_menu(&session, false).await;
    Redirect::to(form.target())
}

fn update_sidebar(
    state: &AppState,
    UiPreferences(mut ui): UiPreferences,
    action: UiAction,
    form: &ReturnForm,
) -> Response {
    ui.apply(action);
    let redirect = Redirect::to(form.target());

    match preferences_cookie(ui.persisted(), state.config().is_https()) {
        Some(cookie) => ([(SET_COOKIE, cookie)], redirect).into_response(),
        None => redirect.into_response(),
    }
}

/// Absolute path on this site, not a protocol-relative URL.
fn is_local_path(path: &str) -> bool {
    path.starts_with('/') && !path.starts_with("//") && !path.contains('\\')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(return_to: &str) -> ReturnForm {
        ReturnForm {
            return_to: Some(return_to.to_string()),
        }
    }

    #[test]
    fn test_return_to_local_paths_only() {
        assert_eq!(form("/livestock?category=Goats").target(), "/livestock?category=Goats");
        assert_eq!(form("//evil.example").target(), "/");
        assert_eq!(form("https://evil.example").target(), "/");
        assert_eq!(form("/\\evil.example").target(), "/");
        assert_eq!(ReturnForm::default().target(), "/");
    }
}
