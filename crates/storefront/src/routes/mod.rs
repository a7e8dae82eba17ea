//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Home page
//! GET  /fragments/categories   - Category showcase (HTMX)
//! GET  /fragments/latest       - Latest listings (HTMX)
//!
//! # Catalog
//! GET  /livestock              - Catalog with filter bar
//! POST /livestock/filters      - Apply filters, redirect to the new URL
//! POST /livestock/view-mode    - Switch grid/list
//! GET  /livestock/{id}         - Listing detail
//! GET  /livestock/{id}/modal   - Detail modal (HTMX)
//! POST /modal/close            - Close the detail modal (HTMX)
//! GET  /categories             - Category listing
//! GET  /eggs                   - Egg listings
//! GET  /search                 - Search page
//!
//! # Chat (HTMX fragments)
//! GET  /chat/panel             - Current panel
//! POST /chat/open              - Open the panel
//! POST /chat/close             - Close the panel
//! POST /chat/toggle            - Toggle the panel
//! POST /chat/expand            - Toggle expanded layout
//! POST /chat/messages          - Send a message (rate limited)
//! GET  /chat/reply             - Assistant reply to the pending message
//! POST /chat/clear             - Reset the transcript
//!
//! # UI preferences
//! POST /ui/sidebar/{toggle,open,close}
//! POST /ui/mobile-menu/{open,close}
//!
//! # Auth
//! GET  /auth/login             - Login page
//! POST /auth/login             - Login action (rate limited)
//! POST /auth/logout            - Logout action
//! ```

pub mod auth;
pub mod catalog;
pub mod categories;
pub mod chat;
pub mod eggs;
pub mod home;
pub mod listings;
pub mod search;
pub mod ui;
pub mod views;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::{auth_rate_limiter, chat_rate_limiter};
use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/login",
            get(auth::login_page).post(auth::login).layer(auth_rate_limiter()),
        )
        .route("/logout", post(auth::logout))
}

/// Create the catalog routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::index))
        .route("/filters", post(catalog::apply_filters))
        .route("/view-mode", post(catalog::set_view_mode))
        .route("/{id}", get(listings::show))
        .route("/{id}/modal", get(listings::open_modal))
}

/// Create the chat routes router.
pub fn chat_routes() -> Router<AppState> {
    Router::new()
        .route("/panel", get(chat::panel))
        .route("/open", post(chat::open))
        .route("/close", post(chat::close))
        .route("/toggle", post(chat::toggle))
        .route("/expand", post(chat::expand))
        .route(
            "/messages",
            post(chat::send_message).layer(chat_rate_limiter()),
        )
        .route("/reply", get(chat::reply))
        .route("/clear", post(chat::clear))
}

/// Create the UI preference routes router.
pub fn ui_routes() -> Router<AppState> {
    Router::new()
        .route("/sidebar/toggle", post(ui::toggle_sidebar))
        .route("/sidebar/open", post(ui::open_sidebar))
        .route("/sidebar/close", post(ui::close_sidebar))
        .route("/mobile-menu/open", post(ui::open_mobile_menu))
        .route("/mobile-menu/close", post(ui::close_mobile_menu))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page and its lazy sections
        .route("/", get(home::home))
        .route("/fragments/categories", get(home::category_showcase))
        .route("/fragments/latest", get(home::latest_listings))
        // Catalog
        .nest("/livestock", catalog_routes())
        .route("/modal/close", post(listings::close_modal))
        .route("/categories", get(categories::index))
        .route("/eggs", get(eggs::index))
        .route("/search", get(search::search))
        // Chat assistant
        .nest("/chat", chat_routes())
        // Sidebar and mobile menu
        .nest("/ui", ui_routes())
        // Auth routes
        .nest("/auth", auth_routes())
}
