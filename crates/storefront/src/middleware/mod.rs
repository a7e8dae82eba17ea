//! HTTP middleware stack for the storefront.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//! 4. Session layer (tower-sessions, ends with the browser session)
//! 5. Security headers (CSP, frame and referrer policy)
//! 6. Rate limiting (governor, login and chat only)
//!
//! The extractors here read per-visitor state: [`OptionalAuth`] for the
//! logged-in account, [`UiPreferences`] for sidebar and mobile menu, and
//! [`PageContext`] for everything the page shell needs at once.

pub mod auth;
pub mod page;
pub mod preferences;
pub mod rate_limit;
pub mod request_id;
pub mod security_headers;
pub mod session;

pub use auth::{OptionalAuth, clear_current_user, set_current_user};
pub use page::PageContext;
pub use preferences::{UiPreferences, preferences_cookie, save_mobile_menu};
pub use rate_limit::{auth_rate_limiter, chat_rate_limiter};
pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
pub use session::{SessionBacked, create_session_layer, dispatch, load_store, save_store};
