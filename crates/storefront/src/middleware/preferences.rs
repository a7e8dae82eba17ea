//! The persisted UI preference cookie.
//!
//! Only [`PersistedUiPreferences`] is ever written: the sidebar flag, as
//! base64url-encoded JSON in a long-lived cookie named after
//! [`PersistedUiPreferences::STORAGE_KEY`]. The mobile menu is per-visit and
//! lives in the session instead.
//!
//! A missing or malformed cookie hydrates to the defaults.

use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, HeaderValue, header::COOKIE, request::Parts},
};
use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use livestock_core::stores::{PersistedUiPreferences, UiStore};
use tower_sessions::Session;
use tower_sessions::cookie::{Cookie, SameSite, time::Duration};

use crate::models::session_keys;

/// Cookie name for the persisted preferences.
pub const COOKIE_NAME: &str = PersistedUiPreferences::STORAGE_KEY;

/// Preference cookie lifetime.
const MAX_AGE_DAYS: i64 = 365;

/// Encode preferences as a cookie-safe value.
///
/// # Errors
///
/// Returns an error if the preferences cannot be serialized.
pub fn encode(prefs: PersistedUiPreferences) -> Result<String, serde_json::Error> {
    let json = serde_json::to_vec(&prefs)?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}

/// Decode a cookie value. `None` for anything that isn't a valid record.
#[must_use]
pub fn decode(value: &str) -> Option<PersistedUiPreferences> {
    let bytes = URL_SAFE_NO_PAD.decode(value.trim()).ok()?;
    serde_json::from_slice(&bytes).ok()
}

/// Read the persisted preferences from request headers.
#[must_use]
pub fn read_persisted(headers: &HeaderMap) -> PersistedUiPreferences {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(Cookie::split_parse)
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == COOKIE_NAME)
        .and_then(|cookie| decode(cookie.value()))
        .unwrap_or_default()
}

/// Build the `Set-Cookie` value that persists `prefs`.
///
/// Persistence is fire-and-forget: if encoding fails the write is skipped and
/// logged, and the page still renders with the in-memory state.
#[must_use]
pub fn preferences_cookie(prefs: PersistedUiPreferences, secure: bool) -> Option<HeaderValue> {
    let value = match encode(prefs) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to encode UI preferences");
            return None;
        }
    };

    let cookie = Cookie::build((COOKIE_NAME, value))
        .path("/")
        .max_age(Duration::days(MAX_AGE_DAYS))
        .same_site(SameSite::Lax)
        .http_only(true)
        .secure(secure)
        .build();

    HeaderValue::from_str(&cookie.to_string())
        .inspect_err(|e| tracing::warn!(error = %e, "UI preference cookie is not a valid header"))
        .ok()
}

/// Extractor for the visitor's [`UiStore`].
///
/// The sidebar flag comes from the preference cookie; the mobile menu flag
/// from the session (closed when absent).
pub struct UiPreferences(pub UiStore);

impl<S> FromRequestParts<S> for UiPreferences
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self(ui_store(parts).await))
    }
}

/// Hydrate the UI store for this request.
pub(crate) async fn ui_store(parts: &Parts) -> UiStore {
    let mut ui = UiStore::hydrate(read_persisted(&parts.headers));

    if let Some(session) = parts.extensions.get::<Session>() {
        let open = session
            .get::<bool>(session_keys::MOBILE_MENU)
            .await
            .ok()
            .flatten()
            .unwrap_or(false);
        ui.set_mobile_menu_open(open);
    }

    ui
}

/// Persist the mobile menu flag for the rest of the visit.
pub async fn save_mobile_menu(session: &Session, open: bool) {
    if let Err(e) = session.insert(session_keys::MOBILE_MENU, open).await {
        tracing::warn!(error = %e, "Failed to save mobile menu state");
    }
}
