//! Public, cached catalog reads used by the storefront.

use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::Value;

use crate::domain::entities::Catalog;
use crate::error::AppError;
use crate::state::AppState;

/// Active categories, featured first.
///
/// # Endpoint
///
/// `GET /catalog/{catalog}/categories`
///
/// # Cache
///
/// Served from `catalog:{catalog}:categories` until an admin change
/// revalidates the catalog.
pub async fn storefront_categories_handler(
    State(state): State<AppState>,
    Path(catalog): Path<Catalog>,
) -> Result<Json<Value>, AppError> {
    Ok(Json(state.storefront_service.categories(catalog).await?))
}

/// An active category with its active items.
///
/// # Endpoint
///
/// `GET /catalog/{catalog}/categories/{slug}`
///
/// # Errors
///
/// Returns 404 Not Found for unknown or inactive categories.
pub async fn storefront_category_handler(
    State(state): State<AppState>,
    Path((catalog, slug)): Path<(Catalog, String)>,
) -> Result<Json<Value>, AppError> {
    Ok(Json(state.storefront_service.category(catalog, &slug).await?))
}

/// # Endpoint
///
/// `GET /catalog/{catalog}/featured`
pub async fn storefront_featured_handler(
    State(state): State<AppState>,
    Path(catalog): Path<Catalog>,
) -> Result<Json<Value>, AppError> {
    Ok(Json(state.storefront_service.featured(catalog).await?))
}
