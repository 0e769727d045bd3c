//! Handlers for item management endpoints.
//!
//! Mirrors [`super::categories`]; items additionally carry a price, an
//! optional SKU and the category they belong to.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::image::{ConfirmImageRequest, ImageUploadRequest};
use crate::api::dto::item::{CreateItemRequest, UpdateItemRequest};
use crate::api::dto::list_query::ItemListParams;
use crate::api::dto::{ActionResponse, BulkDeleteRequest};
use crate::application::services::{BulkDeleteReport, FailedId, PresignedUpload};
use crate::domain::entities::{Catalog, Item};
use crate::domain::query::Page;
use crate::error::AppError;
use crate::state::AppState;

/// # Endpoint
///
/// `GET /api/{catalog}/items?category_id=3&min_price=10&max_price=50&sort=price&order=asc`
pub async fn list_items_handler(
    State(state): State<AppState>,
    Path(catalog): Path<Catalog>,
    Query(params): Query<ItemListParams>,
) -> Result<Json<ActionResponse<Page<Item>>>, AppError> {
    let query = params.into_query()?;
    let page = state.item_service.list(catalog, query).await?;
    Ok(Json(ActionResponse::new("Items loaded", page)))
}

/// # Endpoint
///
/// `GET /api/{catalog}/items/{id}`
pub async fn get_item_handler(
    State(state): State<AppState>,
    Path((catalog, id)): Path<(Catalog, i64)>,
) -> Result<Json<ActionResponse<Item>>, AppError> {
    let item = state.item_service.get(catalog, id).await?;
    Ok(Json(ActionResponse::new("Item loaded", item)))
}

/// Creates an item.
///
/// # Endpoint
///
/// `POST /api/{catalog}/items`
///
/// # Request Body
///
/// ```json
/// { "name": "Hand saw", "category_id": 3, "price": "24.90", "sku": "HS-01" }
/// ```
///
/// # Errors
///
/// - 400 if the category doesn't exist or the price is invalid
/// - 409 if the SKU is taken
pub async fn create_item_handler(
    State(state): State<AppState>,
    Path(catalog): Path<Catalog>,
    Json(payload): Json<CreateItemRequest>,
) -> Result<(StatusCode, Json<ActionResponse<Item>>), AppError> {
    payload.validate()?;

    let item = state.item_service.create(catalog, payload.into()).await?;

    Ok((
        StatusCode::CREATED,
        Json(ActionResponse::new("Item created", item)),
    ))
}

/// # Endpoint
///
/// `PATCH /api/{catalog}/items/{id}`
pub async fn update_item_handler(
    State(state): State<AppState>,
    Path((catalog, id)): Path<(Catalog, i64)>,
    Json(payload): Json<UpdateItemRequest>,
) -> Result<Json<ActionResponse<Item>>, AppError> {
    payload.validate()?;

    let item = state
        .item_service
        .update(catalog, id, payload.into())
        .await?;

    Ok(Json(ActionResponse::new("Item updated", item)))
}

pub async fn toggle_item_active_handler(
    State(state): State<AppState>,
    Path((catalog, id)): Path<(Catalog, i64)>,
) -> Result<Json<ActionResponse<Item>>, AppError> {
    let item = state.item_service.toggle_active(catalog, id).await?;
    let message = if item.is_active {
        "Item activated"
    } else {
        "Item deactivated"
    };
    Ok(Json(ActionResponse::new(message, item)))
}

pub async fn toggle_item_featured_handler(
    State(state): State<AppState>,
    Path((catalog, id)): Path<(Catalog, i64)>,
) -> Result<Json<ActionResponse<Item>>, AppError> {
    let item = state.item_service.toggle_featured(catalog, id).await?;
    let message = if item.is_featured {
        "Item featured"
    } else {
        "Item unfeatured"
    };
    Ok(Json(ActionResponse::new(message, item)))
}

/// # Endpoint
///
/// `DELETE /api/{catalog}/items/{id}`
pub async fn delete_item_handler(
    State(state): State<AppState>,
    Path((catalog, id)): Path<(Catalog, i64)>,
) -> Result<Json<ActionResponse<()>>, AppError> {
    state.item_service.delete(catalog, id).await?;
    Ok(Json(ActionResponse::message("Item deleted")))
}

/// # Endpoint
///
/// `POST /api/{catalog}/items/bulk-delete`
pub async fn bulk_delete_items_handler(
    State(state): State<AppState>,
    Path(catalog): Path<Catalog>,
    Json(payload): Json<BulkDeleteRequest>,
) -> Result<Json<ActionResponse<BulkDeleteReport<FailedId>>>, AppError> {
    payload.validate()?;

    let report = state.item_service.bulk_delete(catalog, &payload.ids).await;

    let message = format!("Deleted {} of {} items", report.deleted, report.requested);
    Ok(Json(ActionResponse::new(message, report)))
}

/// # Endpoint
///
/// `POST /api/{catalog}/items/{id}/image/upload-url`
pub async fn item_image_upload_url_handler(
    State(state): State<AppState>,
    Path((catalog, id)): Path<(Catalog, i64)>,
    Json(payload): Json<ImageUploadRequest>,
) -> Result<Json<ActionResponse<PresignedUpload>>, AppError> {
    payload.validate()?;

    let upload = state
        .item_service
        .image_upload_url(catalog, id, &payload.content_type)
        .await?;

    Ok(Json(ActionResponse::new("Upload URL created", upload)))
}

/// # Endpoint
///
/// `PUT /api/{catalog}/items/{id}/image`
pub async fn confirm_item_image_handler(
    State(state): State<AppState>,
    Path((catalog, id)): Path<(Catalog, i64)>,
    Json(payload): Json<ConfirmImageRequest>,
) -> Result<Json<ActionResponse<Item>>, AppError> {
    payload.validate()?;

    let item = state
        .item_service
        .set_image(catalog, id, &payload.key)
        .await?;

    Ok(Json(ActionResponse::new("Item image updated", item)))
}

/// # Endpoint
///
/// `DELETE /api/{catalog}/items/{id}/image`
pub async fn delete_item_image_handler(
    State(state): State<AppState>,
    Path((catalog, id)): Path<(Catalog, i64)>,
) -> Result<Json<ActionResponse<Item>>, AppError> {
    let item = state.item_service.remove_image(catalog, id).await?;
    Ok(Json(ActionResponse::new("Item image removed", item)))
}
