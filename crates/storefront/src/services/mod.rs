//! Business logic services for the storefront.
//!
//! - [`auth`] - Password login for storefront accounts
//! - [`assistant`] - Canned chat replies when the assistant API is down

pub mod assistant;
pub mod auth;

pub use assistant::Assistant;
pub use auth::{AuthError, AuthService};
