//! Per-request data for the page shell (navigation, sidebar, account menu).

use axum::{extract::FromRequestParts, http::request::Parts};
use livestock_core::stores::UiStore;

use super::auth::current_user;
use super::preferences::ui_store;
use crate::models::CurrentUser;

/// Primary navigation: (href, label).
pub const NAV_LINKS: &[(&str, &str)] = &[
    ("/", "Home"),
    ("/livestock", "Livestock"),
    ("/categories", "Categories"),
    ("/eggs", "Eggs"),
    ("/search", "Search"),
];

/// Everything `base.html` needs, gathered in one extractor.
#[derive(Debug, Clone)]
pub struct PageContext {
    /// Request path, for highlighting the active nav link.
    pub path: String,
    /// Path and query, for forms that redirect back here.
    pub return_to: String,
    pub user: Option<CurrentUser>,
    pub ui: UiStore,
}

impl PageContext {
    /// Whether `href` is the current section.
    #[must_use]
    pub fn is_active(&self, href: &str) -> bool {
        if href == "/" {
            self.path == "/"
        } else {
            self.path == href || self.path.starts_with(&format!("{href}/"))
        }
    }

    #[must_use]
    pub fn nav_links(&self) -> &'static [(&'static str, &'static str)] {
        NAV_LINKS
    }

    #[must_use]
    pub fn user_email(&self) -> Option<&str> {
        self.user.as_ref().map(|u| u.email.as_str())
    }
}

impl<S> FromRequestParts<S> for PageContext
where
    S: Send + Sync,
{
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(Self {
            path: parts.uri.path().to_string(),
            return_to: parts
                .uri
                .path_and_query()
                .map_or_else(|| parts.uri.path().to_string(), ToString::to_string),
            user: current_user(parts).await,
            ui: ui_store(parts).await,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(path: &str) -> PageContext {
        PageContext {
            path: path.to_string(),
            return_to: path.to_string(),
            user: None,
            ui: UiStore::default(),
        }
    }

    #[test]
    fn test_active_link() {
        assert!(page("/").is_active("/"));
        assert!(!page("/livestock").is_active("/"));
        assert!(page("/livestock").is_active("/livestock"));
        assert!(page("/livestock/12").is_active("/livestock"));
        assert!(!page("/livestockx").is_active("/livestock"));
    }
}
