//! Session-related types.
//!
//! Everything here lives only as long as the browser session. The persisted
//! sidebar preference is not a session value; see
//! [`crate::middleware::preferences`].

use serde::{Deserialize, Serialize};

use livestock_core::{Email, UserId};

use crate::models::user::User;

/// Session-stored user identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: UserId,
    pub email: Email,
}

impl From<&User> for CurrentUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
        }
    }
}

/// Session keys.
pub mod keys {
    /// The current logged-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Chat transcript and panel flags.
    pub const CHAT: &str = "chat";

    /// Detail modal state.
    pub const MODAL: &str = "modal";

    /// Catalog grid/list display mode.
    pub const VIEW_MODE: &str = "view_mode";

    /// Mobile navigation drawer.
    pub const MOBILE_MENU: &str = "mobile_menu_open";
}
