//! Handlers for the media file manager.

use axum::{
    Json,
    extract::{Query, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::ActionResponse;
use crate::api::dto::files::{
    CreateFolderRequest, DeleteFilesRequest, DownloadParams, FileUploadRequest, ListFilesParams,
    RenameRequest,
};
use crate::application::services::{
    BulkDeleteReport, FailedKey, PresignedDownload, PresignedUpload, RenameResult,
};
use crate::domain::entities::{Folder, Listing};
use crate::error::AppError;
use crate::state::AppState;

/// Lists one level of the bucket.
///
/// # Endpoint
///
/// `GET /api/files?prefix=uploads/`
///
/// # Response
///
/// ```json
/// {
///   "success": "Files loaded",
///   "data": {
///     "prefix": "uploads/",
///     "parent": "",
///     "folders": [{ "name": "2024", "prefix": "uploads/2024/" }],
///     "objects": [{ "key": "uploads/a.png", "name": "a.png", "size": 2048, "url": "https://…" }]
///   }
/// }
/// ```
pub async fn list_files_handler(
    State(state): State<AppState>,
    Query(params): Query<ListFilesParams>,
) -> Result<Json<ActionResponse<Listing>>, AppError> {
    let listing = state.file_service.list(&params.prefix).await?;
    Ok(Json(ActionResponse::new("Files loaded", listing)))
}

/// # Endpoint
///
/// `POST /api/files/folders`
///
/// # Errors
///
/// Returns 409 Conflict if the folder already exists.
pub async fn create_folder_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateFolderRequest>,
) -> Result<(StatusCode, Json<ActionResponse<Folder>>), AppError> {
    payload.validate()?;

    let folder = state
        .file_service
        .create_folder(&payload.parent, &payload.name)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ActionResponse::new("Folder created", folder)),
    ))
}

/// Renames a file, or a folder with everything inside it.
///
/// # Endpoint
///
/// `POST /api/files/rename`
///
/// # Request Body
///
/// ```json
/// { "key": "uploads/old/", "new_name": "new" }
/// ```
pub async fn rename_file_handler(
    State(state): State<AppState>,
    Json(payload): Json<RenameRequest>,
) -> Result<Json<ActionResponse<RenameResult>>, AppError> {
    payload.validate()?;

    let result = state
        .file_service
        .rename(&payload.key, &payload.new_name)
        .await?;

    Ok(Json(ActionResponse::new("Renamed", result)))
}

/// # Endpoint
///
/// `POST /api/files/delete`
///
/// Keys ending with `/` delete the whole folder.
pub async fn delete_files_handler(
    State(state): State<AppState>,
    Json(payload): Json<DeleteFilesRequest>,
) -> Result<Json<ActionResponse<BulkDeleteReport<FailedKey>>>, AppError> {
    payload.validate()?;

    let report = state.file_service.delete(&payload.keys).await;

    let message = format!("Deleted {} of {} entries", report.deleted, report.requested);
    Ok(Json(ActionResponse::new(message, report)))
}

/// # Endpoint
///
/// `POST /api/files/upload-url`
pub async fn file_upload_url_handler(
    State(state): State<AppState>,
    Json(payload): Json<FileUploadRequest>,
) -> Result<Json<ActionResponse<PresignedUpload>>, AppError> {
    payload.validate()?;

    let upload = state
        .file_service
        .upload_url(&payload.prefix, &payload.file_name, &payload.content_type)
        .await?;

    Ok(Json(ActionResponse::new("Upload URL created", upload)))
}

/// # Endpoint
///
/// `GET /api/files/download-url?key=uploads/a.png`
pub async fn file_download_url_handler(
    State(state): State<AppState>,
    Query(params): Query<DownloadParams>,
) -> Result<Json<ActionResponse<PresignedDownload>>, AppError> {
    let download = state.file_service.download_url(&params.key).await?;
    Ok(Json(ActionResponse::new("Download URL created", download)))
}
