//! Web admin route configuration.

use crate::state::AppState;
use crate::web::handlers::{
    categories_page_handler, dashboard_handler, files_page_handler, items_page_handler,
    login_handler,
};
use axum::{Router, routing::get};

/// Pages behind [`crate::web::middleware::web_auth`].
///
/// # Endpoints
///
/// - `GET /`                      - Dashboard with catalog counts
/// - `GET /{catalog}/categories`  - Category management
/// - `GET /{catalog}/items`       - Item management
/// - `GET /files`                 - File manager
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard_handler))
        .route("/files", get(files_page_handler))
        .route("/{catalog}/categories", get(categories_page_handler))
        .route("/{catalog}/items", get(items_page_handler))
}

/// # Endpoints
///
/// - `GET /login` - Login page
pub fn public_routes() -> Router<AppState> {
    Router::new().route("/login", get(login_handler))
}
