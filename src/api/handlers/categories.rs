//! Handlers for category management endpoints.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::category::{CreateCategoryRequest, UpdateCategoryRequest};
use crate::api::dto::image::{ConfirmImageRequest, ImageUploadRequest};
use crate::api::dto::list_query::CategoryListParams;
use crate::api::dto::{ActionResponse, BulkDeleteRequest};
use crate::application::services::{BulkDeleteReport, FailedId, PresignedUpload};
use crate::domain::entities::{Catalog, Category, CategoryOption};
use crate::domain::query::Page;
use crate::error::AppError;
use crate::state::AppState;

/// Lists categories with filters, sorting and pagination.
///
/// # Endpoint
///
/// `GET /api/{catalog}/categories?page=1&page_size=10&search=&is_active=&sort=name&order=asc`
///
/// # Response
///
/// ```json
/// {
///   "success": "Categories loaded",
///   "data": { "items": [...], "total": 42, "page": 1, "page_size": 10, "total_pages": 5 }
/// }
/// ```
pub async fn list_categories_handler(
    State(state): State<AppState>,
    Path(catalog): Path<Catalog>,
    Query(params): Query<CategoryListParams>,
) -> Result<Json<ActionResponse<Page<Category>>>, AppError> {
    let query = params.into_query()?;
    let page = state.category_service.list(catalog, query).await?;
    Ok(Json(ActionResponse::new("Categories loaded", page)))
}

/// Active categories as `{id, name}` pairs for select inputs.
///
/// # Endpoint
///
/// `GET /api/{catalog}/categories/options`
pub async fn category_options_handler(
    State(state): State<AppState>,
    Path(catalog): Path<Catalog>,
) -> Result<Json<ActionResponse<Vec<CategoryOption>>>, AppError> {
    let options = state.category_service.options(catalog).await?;
    Ok(Json(ActionResponse::new("Category options loaded", options)))
}

/// # Endpoint
///
/// `GET /api/{catalog}/categories/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if the category doesn't exist.
pub async fn get_category_handler(
    State(state): State<AppState>,
    Path((catalog, id)): Path<(Catalog, i64)>,
) -> Result<Json<ActionResponse<Category>>, AppError> {
    let category = state.category_service.get(catalog, id).await?;
    Ok(Json(ActionResponse::new("Category loaded", category)))
}

/// Creates a category; the slug is derived from the name.
///
/// # Endpoint
///
/// `POST /api/{catalog}/categories`
///
/// # Request Body
///
/// ```json
/// { "name": "Garden tools", "description": "Everything for the garden", "is_featured": true }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if validation fails.
pub async fn create_category_handler(
    State(state): State<AppState>,
    Path(catalog): Path<Catalog>,
    Json(payload): Json<CreateCategoryRequest>,
) -> Result<(StatusCode, Json<ActionResponse<Category>>), AppError> {
    payload.validate()?;

    let category = state
        .category_service
        .create(catalog, payload.into())
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ActionResponse::new("Category created", category)),
    ))
}

/// Partially updates a category.
///
/// # Endpoint
///
/// `PATCH /api/{catalog}/categories/{id}`
///
/// Only provided fields change; `"description": null` clears the description.
/// Renaming regenerates the slug.
pub async fn update_category_handler(
    State(state): State<AppState>,
    Path((catalog, id)): Path<(Catalog, i64)>,
    Json(payload): Json<UpdateCategoryRequest>,
) -> Result<Json<ActionResponse<Category>>, AppError> {
    payload.validate()?;

    let category = state
        .category_service
        .update(catalog, id, payload.into())
        .await?;

    Ok(Json(ActionResponse::new("Category updated", category)))
}

/// # Endpoint
///
/// `POST /api/{catalog}/categories/{id}/toggle-active`
pub async fn toggle_category_active_handler(
    State(state): State<AppState>,
    Path((catalog, id)): Path<(Catalog, i64)>,
) -> Result<Json<ActionResponse<Category>>, AppError> {
    let category = state.category_service.toggle_active(catalog, id).await?;
    let message = if category.is_active {
        "Category activated"
    } else {
        "Category deactivated"
    };
    Ok(Json(ActionResponse::new(message, category)))
}

/// # Endpoint
///
/// `POST /api/{catalog}/categories/{id}/toggle-featured`
pub async fn toggle_category_featured_handler(
    State(state): State<AppState>,
    Path((catalog, id)): Path<(Catalog, i64)>,
) -> Result<Json<ActionResponse<Category>>, AppError> {
    let category = state.category_service.toggle_featured(catalog, id).await?;
    let message = if category.is_featured {
        "Category featured"
    } else {
        "Category unfeatured"
    };
    Ok(Json(ActionResponse::new(message, category)))
}

/// Deletes a category and its image.
///
/// # Endpoint
///
/// `DELETE /api/{catalog}/categories/{id}`
///
/// # Errors
///
/// Returns 400 Bad Request while items still belong to the category and
/// 404 Not Found if it doesn't exist.
pub async fn delete_category_handler(
    State(state): State<AppState>,
    Path((catalog, id)): Path<(Catalog, i64)>,
) -> Result<Json<ActionResponse<()>>, AppError> {
    state.category_service.delete(catalog, id).await?;
    Ok(Json(ActionResponse::message("Category deleted")))
}

/// Deletes several categories, reporting each failure separately.
///
/// # Endpoint
///
/// `POST /api/{catalog}/categories/bulk-delete`
///
/// # Request Body
///
/// ```json
/// { "ids": [3, 4, 5] }
/// ```
///
/// # Response
///
/// Always 200 once the request is valid:
///
/// ```json
/// {
///   "success": "Deleted 2 of 3 categories",
///   "data": {
///     "requested": 3,
///     "deleted": 2,
///     "failed": [{ "id": 4, "error": { "code": "validation_error", "message": "...", "details": {} } }]
///   }
/// }
/// ```
pub async fn bulk_delete_categories_handler(
    State(state): State<AppState>,
    Path(catalog): Path<Catalog>,
    Json(payload): Json<BulkDeleteRequest>,
) -> Result<Json<ActionResponse<BulkDeleteReport<FailedId>>>, AppError> {
    payload.validate()?;

    let report = state
        .category_service
        .bulk_delete(catalog, &payload.ids)
        .await;

    let message = format!(
        "Deleted {} of {} categories",
        report.deleted, report.requested
    );
    Ok(Json(ActionResponse::new(message, report)))
}

/// Presigns the upload of a category image.
///
/// # Endpoint
///
/// `POST /api/{catalog}/categories/{id}/image/upload-url`
///
/// # Request Body
///
/// ```json
/// { "file_name": "hero.webp", "content_type": "image/webp" }
/// ```
pub async fn category_image_upload_url_handler(
    State(state): State<AppState>,
    Path((catalog, id)): Path<(Catalog, i64)>,
    Json(payload): Json<ImageUploadRequest>,
) -> Result<Json<ActionResponse<PresignedUpload>>, AppError> {
    payload.validate()?;

    let upload = state
        .category_service
        .image_upload_url(catalog, id, &payload.content_type)
        .await?;

    Ok(Json(ActionResponse::new("Upload URL created", upload)))
}

/// Confirms an uploaded category image.
///
/// # Endpoint
///
/// `PUT /api/{catalog}/categories/{id}/image`
pub async fn confirm_category_image_handler(
    State(state): State<AppState>,
    Path((catalog, id)): Path<(Catalog, i64)>,
    Json(payload): Json<ConfirmImageRequest>,
) -> Result<Json<ActionResponse<Category>>, AppError> {
    payload.validate()?;

    let category = state
        .category_service
        .set_image(catalog, id, &payload.key)
        .await?;

    Ok(Json(ActionResponse::new("Category image updated", category)))
}

/// # Endpoint
///
/// `DELETE /api/{catalog}/categories/{id}/image`
pub async fn delete_category_image_handler(
    State(state): State<AppState>,
    Path((catalog, id)): Path<(Catalog, i64)>,
) -> Result<Json<ActionResponse<Category>>, AppError> {
    let category = state.category_service.remove_image(catalog, id).await?;
    Ok(Json(ActionResponse::new("Category image removed", category)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::handlers::test_support::{StateBuilder, category};
    use crate::api::routes::protected_routes;
    use axum_test::TestServer;
    use mockall::predicate::eq;
    use serde_json::{Value, json};

    fn server(state: AppState) -> TestServer {
        TestServer::new(protected_routes().with_state(state)).unwrap()
    }

    #[tokio::test]
    async fn test_list_wraps_page_in_envelope() {
        let mut builder = StateBuilder::new();
        builder
            .categories
            .expect_list()
            .withf(|catalog, query| {
                *catalog == Catalog::Products && query.page.page == 2 && query.page.page_size == 5
            })
            .times(1)
            .returning(|_, query| Ok(Page::new(vec![category(1, "tools")], 6, query.page)));

        let response = server(builder.build())
            .get("/products/categories")
            .add_query_param("page", 2)
            .add_query_param("page_size", 5)
            .await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(body["success"], "Categories loaded");
        assert_eq!(body["data"]["total"], 6);
        assert_eq!(body["data"]["total_pages"], 2);
        assert_eq!(body["data"]["items"][0]["slug"], "tools");
    }

    #[tokio::test]
    async fn test_list_rejects_unknown_sort() {
        let mut builder = StateBuilder::new();
        builder.categories.expect_list().never();

        let response = server(builder.build())
            .get("/products/categories")
            .add_query_param("sort", "password")
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>()["error"]["code"], "validation_error");
    }

    #[tokio::test]
    async fn test_get_missing_category_is_404() {
        let mut builder = StateBuilder::new();
        builder
            .categories
            .expect_find_by_id()
            .with(eq(Catalog::Services), eq(99))
            .returning(|_, _| Ok(None));

        let response = server(builder.build()).get("/services/categories/99").await;

        response.assert_status_not_found();
        assert_eq!(response.json::<Value>()["error"]["code"], "not_found");
    }

    #[tokio::test]
    async fn test_create_returns_201_and_revalidates() {
        let mut builder = StateBuilder::new();
        builder
            .categories
            .expect_slug_exists()
            .returning(|_, _, _| Ok(false));
        builder
            .categories
            .expect_create()
            .withf(|_, new| new.slug == "garden-tools" && new.is_active && !new.is_featured)
            .times(1)
            .returning(|_, new| Ok(category(7, &new.slug)));
        builder
            .cache
            .expect_invalidate_prefix()
            .with(eq("catalog:products:"))
            .times(1)
            .returning(|_| Ok(0));

        let response = server(builder.build())
            .post("/products/categories")
            .json(&json!({ "name": "Garden Tools" }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body = response.json::<Value>();
        assert_eq!(body["success"], "Category created");
        assert_eq!(body["data"]["id"], 7);
    }

    #[tokio::test]
    async fn test_create_rejects_blank_name() {
        let mut builder = StateBuilder::new();
        builder.categories.expect_create().never();

        let response = server(builder.build())
            .post("/products/categories")
            .json(&json!({ "name": "  " }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_delete_with_items_is_rejected() {
        let mut builder = StateBuilder::new();
        builder
            .categories
            .expect_find_by_id()
            .returning(|_, id| Ok(Some(category(id, "tools"))));
        builder.categories.expect_count_items().returning(|_, _| Ok(3));
        builder.categories.expect_delete().never();
        builder.storage.expect_delete().never();
        builder.cache.expect_invalidate_prefix().never();

        let response = server(builder.build()).delete("/products/categories/4").await;

        response.assert_status(StatusCode::BAD_REQUEST);
        let body = response.json::<Value>();
        assert_eq!(body["error"]["details"]["item_count"], 3);
    }

    #[tokio::test]
    async fn test_bulk_delete_reports_failures() {
        let mut builder = StateBuilder::new();
        builder
            .categories
            .expect_find_by_id()
            .with(eq(Catalog::Products), eq(2))
            .returning(|_, _| Ok(None));
        builder
            .categories
            .expect_find_by_id()
            .returning(|_, id| Ok(Some(category(id, "empty"))));
        builder.categories.expect_count_items().returning(|_, _| Ok(0));
        builder.categories.expect_delete().times(1).returning(|_, _| Ok(()));
        builder
            .cache
            .expect_invalidate_prefix()
            .times(1)
            .returning(|_| Ok(2));

        let response = server(builder.build())
            .post("/products/categories/bulk-delete")
            .json(&json!({ "ids": [1, 2] }))
            .await;

        response.assert_status_ok();
        let body = response.json::<Value>();
        assert_eq!(body["success"], "Deleted 1 of 2 categories");
        assert_eq!(body["data"]["deleted"], 1);
        assert_eq!(body["data"]["failed"][0]["id"], 2);
        assert_eq!(body["data"]["failed"][0]["error"]["code"], "not_found");
    }

    #[tokio::test]
    async fn test_image_upload_url_rejects_documents() {
        let mut builder = StateBuilder::new();
        builder
            .categories
            .expect_find_by_id()
            .returning(|_, id| Ok(Some(category(id, "tools"))));
        builder.storage.expect_presign_put().never();

        let response = server(builder.build())
            .post("/products/categories/1/image/upload-url")
            .json(&json!({ "file_name": "a.pdf", "content_type": "application/pdf" }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
    }
}
