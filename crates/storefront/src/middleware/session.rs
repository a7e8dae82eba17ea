//! Session middleware configuration and session-backed stores.
//!
//! The chat transcript, the detail modal and the catalog display mode live in
//! the session. The session cookie has no max-age, so all of them are gone
//! once the browser session ends.

use livestock_core::stores::{ChatStore, ModalStore, Store};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tower_sessions::{Expiry, Session, SessionManagerLayer, SessionStore};

use crate::config::StorefrontConfig;
use crate::models::session_keys;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "lm_session";

/// Create the session layer over `store`.
///
/// Production passes a `PostgresStore`; the sessions table is created by the
/// storefront migrations.
#[must_use]
pub fn create_session_layer<S>(store: S, config: &StorefrontConfig) -> SessionManagerLayer<S>
where
    S: SessionStore + Clone,
{
    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnSessionEnd)
        .with_secure(config.is_https())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}

/// A store kept in the visitor's session under a fixed key.
pub trait SessionBacked: Store + Serialize + DeserializeOwned + Send + Sync {
    /// Session key for the serialized store.
    const KEY: &'static str;
}

impl SessionBacked for ChatStore {
    const KEY: &'static str = session_keys::CHAT;
}

impl SessionBacked for ModalStore {
    const KEY: &'static str = session_keys::MODAL;
}

/// Load a store from the session, falling back to its initial value.
///
/// A record that no longer deserializes is discarded rather than failing the
/// request.
pub async fn load_store<T: SessionBacked>(session: &Session) -> T {
    match session.get::<T>(T::KEY).await {
        Ok(Some(store)) => store,
        Ok(None) => T::default(),
        Err(e) => {
            tracing::warn!(error = %e, key = T::KEY, "Discarding unreadable session store");
            T::default()
        }
    }
}

/// Write a store back to the session. Failures are logged, not returned.
pub async fn save_store<T: SessionBacked>(session: &Session, store: &T) {
    if let Err(e) = session.insert(T::KEY, store).await {
        tracing::warn!(error = %e, key = T::KEY, "Failed to save session store");
    }
}

/// Load, apply one action, save, and return the updated store.
pub async fn dispatch<T: SessionBacked>(session: &Session, action: T::Action) -> T {
    let mut store = load_store::<T>(session).await;
    store.apply(action);
    save_store(session, &store).await;
    store
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use livestock_core::LivestockId;
    use livestock_core::stores::{ChatAction, ChatRole, ModalAction};
    use tower_sessions::MemoryStore;
    use uuid::Uuid;

    use super::*;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn test_missing_store_loads_default() {
        let session = session();
        let chat: ChatStore = load_store(&session).await;
        assert_eq!(chat.messages().len(), 1);
        assert!(!chat.is_open());
    }

    #[tokio::test]
    async fn test_dispatch_persists_between_loads() {
        let session = session();
        dispatch::<ChatStore>(
            &session,
            ChatAction::AddMessage {
                role: ChatRole::User,
                content: "any ewes?".to_string(),
            },
        )
        .await;
        dispatch::<ChatStore>(&session, ChatAction::OpenChat).await;

        let chat: ChatStore = load_store(&session).await;
        assert!(chat.is_open());
        assert_eq!(chat.messages().len(), 2);
        assert_eq!(
            chat.last_user_message().map(|m| m.content.as_str()),
            Some("any ewes?")
        );
    }

    #[tokio::test]
    async fn test_modal_round_trip() {
        let session = session();
        let id = LivestockId::new(Uuid::from_u128(8));
        let modal = dispatch::<ModalStore>(&session, ModalAction::OpenDetailModal(id)).await;
        assert_eq!(modal.selected_id(), Some(id));

        let closed = dispatch::<ModalStore>(&session, ModalAction::CloseDetailModal).await;
        assert_eq!(closed, ModalStore::default());
        assert_eq!(load_store::<ModalStore>(&session).await, ModalStore::default());
    }
}
