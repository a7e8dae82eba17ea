//! Sign in and sign out.
//!
//! Accounts are created by operators through the CLI; the storefront only
//! checks credentials.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use crate::error::{AppError, clear_sentry_user, set_sentry_user};
use crate::filters;
use crate::middleware::{OptionalAuth, PageContext, clear_current_user, set_current_user};
use crate::models::CurrentUser;
use crate::services::{AuthError, AuthService};
use crate::state::AppState;

/// Message shown for every failed sign-in.
pub const LOGIN_FAILED_MESSAGE: &str = "Invalid email or password.";

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub page: PageContext,
    pub error: Option<String>,
    /// Email to prefill after a failed attempt.
    pub email: String,
}

/// Display the login page. Signed-in visitors are sent home.
pub async fn login_page(OptionalAuth(user): OptionalAuth, page: PageContext) -> Response {
    if user.is_some() {
        return Redirect::to("/").into_response();
    }

    LoginTemplate {
        page,
        error: None,
        email: String::new(),
    }
    .into_response()
}

/// Handle login form submission.
///
/// Failures re-render the form with a single generic message.
#[instrument(skip(state, page, session, form))]
pub async fn login(
    State(state): State<AppState>,
    page: PageContext,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let auth = AuthService::new(state.pool());

    let user = match auth.login_with_password(&form.email, &form.password).await {
        Ok(user) => user,
        Err(e) => {
            match &e {
                AuthError::InvalidCredentials | AuthError::InvalidEmail(_) => {
                    tracing::info!("Login rejected");
                }
                _ => tracing::error!(error = %e, "Login failed"),
            }
            return Ok(LoginTemplate {
                page,
                error: Some(LOGIN_FAILED_MESSAGE.to_string()),
                email: form.email.trim().to_string(),
            }
            .into_response());
        }
    };

    let current = CurrentUser::from(&user);
    set_current_user(&session, &current).await?;
    set_sentry_user(&current.id, Some(current.email.as_str()));
    tracing::info!(user_id = %current.id, "User logged in");

    Ok(Redirect::to("/").into_response())
}

/// Handle logout. The rest of the visit (chat, modal) is kept.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Redirect {
    if let Err(e) = clear_current_user(&session).await {
        tracing::error!(error = %e, "Failed to clear session user");
    }
    clear_sentry_user();

    Redirect::to("/")
}
