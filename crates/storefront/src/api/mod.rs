//! Livestock catalog REST API client.
//!
//! # Architecture
//!
//! - The catalog API owns every listing, category and egg batch; nothing is
//!   synced locally
//! - Plain JSON over `reqwest`, decoded straight into the types in [`types`]
//! - In-memory caching via `moka` (TTL from `CATALOG_CACHE_TTL_SECS`)
//! - Failed calls surface as [`ApiError`] and are never retried
//!
//! # Example
//!
//! ```rust,ignore
//! use livestock_storefront::api::CatalogClient;
//!
//! let client = CatalogClient::new(&config.catalog);
//! let categories = client.list_categories().await?;
//! let page = client.list_livestock(&query.filters(), query.page()).await?;
//! ```

mod cache;
mod client;
pub mod types;

pub use client::CatalogClient;
pub use types::*;

use thiserror::Error;

/// Errors that can occur when talking to the catalog API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP request failed (connection refused, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Request URL could not be built.
    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by the API.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// Any other non-success status.
    #[error("API returned HTTP {status}")]
    Status { status: u16, body: String },
}

impl ApiError {
    /// Short message suitable for an inline error state.
    #[must_use]
    pub const fn user_message(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "That listing could not be found.",
            Self::RateLimited(_) => "The catalog is busy right now. Please try again in a moment.",
            Self::Http(_) | Self::Url(_) | Self::Parse(_) | Self::Status { .. } => {
                "We couldn't load this right now. Please try again."
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ApiError::RateLimited(30);
        assert_eq!(err.to_string(), "Rate limited, retry after 30 seconds");

        let err = ApiError::Status {
            status: 503,
            body: "maintenance".to_string(),
        };
        assert_eq!(err.to_string(), "API returned HTTP 503");
    }

    #[test]
    fn test_user_message_hides_details() {
        let err = ApiError::Status {
            status: 500,
            body: "Traceback (most recent call last)".to_string(),
        };
        assert!(!err.user_message().contains("Traceback"));
        assert!(
            ApiError::NotFound("livestock 9".to_string())
                .user_message()
                .contains("could not be found")
        );
    }
}
