//! API route configuration.
//!
//! Admin endpoints require Bearer token authentication via
//! [`crate::api::middleware::auth`]; storefront reads are public.

use crate::api::handlers::{
    bulk_delete_categories_handler, bulk_delete_items_handler, category_image_upload_url_handler,
    category_options_handler, confirm_category_image_handler, confirm_item_image_handler,
    create_category_handler, create_folder_handler, create_item_handler, delete_category_handler,
    delete_category_image_handler, delete_files_handler, delete_item_handler,
    delete_item_image_handler, file_download_url_handler, file_upload_url_handler,
    get_category_handler, get_item_handler, item_image_upload_url_handler,
    list_categories_handler, list_files_handler, list_items_handler, rename_file_handler,
    storefront_categories_handler, storefront_category_handler, storefront_featured_handler,
    toggle_category_active_handler, toggle_category_featured_handler,
    toggle_item_active_handler, toggle_item_featured_handler, update_category_handler,
    update_item_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post, put},
};

/// Admin routes, mounted under `/api` behind Bearer token authentication.
///
/// # Endpoints
///
/// Categories (`{catalog}` is `products` or `services`):
///
/// - `GET    /{catalog}/categories`                      - Paginated list
/// - `POST   /{catalog}/categories`                      - Create
/// - `GET    /{catalog}/categories/options`              - `{id, name}` pairs
/// - `POST   /{catalog}/categories/bulk-delete`          - Delete many
/// - `GET    /{catalog}/categories/{id}`                 - Read
/// - `PATCH  /{catalog}/categories/{id}`                 - Partial update
/// - `DELETE /{catalog}/categories/{id}`                 - Delete
/// - `POST   /{catalog}/categories/{id}/toggle-active`   - Flip `is_active`
/// - `POST   /{catalog}/categories/{id}/toggle-featured` - Flip `is_featured`
/// - `POST   /{catalog}/categories/{id}/image/upload-url`- Presign image upload
/// - `PUT    /{catalog}/categories/{id}/image`           - Confirm image
/// - `DELETE /{catalog}/categories/{id}/image`           - Remove image
///
/// Items expose the same set under `/{catalog}/items`, without `options`.
///
/// Files:
///
/// - `GET  /files`              - List one level (`?prefix=`)
/// - `POST /files/folders`      - Create folder
/// - `POST /files/rename`       - Rename file or folder
/// - `POST /files/delete`       - Delete files and folders
/// - `POST /files/upload-url`   - Presign upload
/// - `GET  /files/download-url` - Presign download (`?key=`)
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/{catalog}/categories",
            get(list_categories_handler).post(create_category_handler),
        )
        .route(
            "/{catalog}/categories/options",
            get(category_options_handler),
        )
        .route(
            "/{catalog}/categories/bulk-delete",
            post(bulk_delete_categories_handler),
        )
        .route(
            "/{catalog}/categories/{id}",
            get(get_category_handler)
                .patch(update_category_handler)
                .delete(delete_category_handler),
        )
        .route(
            "/{catalog}/categories/{id}/toggle-active",
            post(toggle_category_active_handler),
        )
        .route(
            "/{catalog}/categories/{id}/toggle-featured",
            post(toggle_category_featured_handler),
        )
        .route(
            "/{catalog}/categories/{id}/image/upload-url",
            post(category_image_upload_url_handler),
        )
        .route(
            "/{catalog}/categories/{id}/image",
            put(confirm_category_image_handler).delete(delete_category_image_handler),
        )
        .route(
            "/{catalog}/items",
            get(list_items_handler).post(create_item_handler),
        )
        .route(
            "/{catalog}/items/bulk-delete",
            post(bulk_delete_items_handler),
        )
        .route(
            "/{catalog}/items/{id}",
            get(get_item_handler)
                .patch(update_item_handler)
                .delete(delete_item_handler),
        )
        .route(
            "/{catalog}/items/{id}/toggle-active",
            post(toggle_item_active_handler),
        )
        .route(
            "/{catalog}/items/{id}/toggle-featured",
            post(toggle_item_featured_handler),
        )
        .route(
            "/{catalog}/items/{id}/image/upload-url",
            post(item_image_upload_url_handler),
        )
        .route(
            "/{catalog}/items/{id}/image",
            put(confirm_item_image_handler).delete(delete_item_image_handler),
        )
        .route("/files", get(list_files_handler))
        .route("/files/folders", post(create_folder_handler))
        .route("/files/rename", post(rename_file_handler))
        .route("/files/delete", post(delete_files_handler))
        .route("/files/upload-url", post(file_upload_url_handler))
        .route("/files/download-url", get(file_download_url_handler))
}

/// Public storefront reads, mounted under `/catalog`.
///
/// # Endpoints
///
/// - `GET /{catalog}/categories`        - Active categories
/// - `GET /{catalog}/categories/{slug}` - Category with its active items
/// - `GET /{catalog}/featured`          - Featured items
pub fn storefront_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/{catalog}/categories",
            get(storefront_categories_handler),
        )
        .route(
            "/{catalog}/categories/{slug}",
            get(storefront_category_handler),
        )
        .route("/{catalog}/featured", get(storefront_featured_handler))
}
