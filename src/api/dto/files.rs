//! Request bodies and query parameters of the file manager.

use serde::Deserialize;
use validator::Validate;

/// `GET /api/files?prefix=uploads/2024/`
#[derive(Debug, Default, Deserialize)]
pub struct ListFilesParams {
    #[serde(default)]
    pub prefix: String,
}

/// `GET /api/files/download-url?key=…`
#[derive(Debug, Deserialize)]
pub struct DownloadParams {
    pub key: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateFolderRequest {
    #[serde(default)]
    pub parent: String,

    #[validate(length(min = 1, max = 255, message = "Folder name must be 1-255 characters"))]
    pub name: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RenameRequest {
    #[validate(length(min = 1, max = 1024, message = "Key is required"))]
    pub key: String,

    #[validate(length(min = 1, max = 255, message = "New name must be 1-255 characters"))]
    pub new_name: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct DeleteFilesRequest {
    #[validate(length(min = 1, max = 1000, message = "Between 1 and 1000 keys per request"))]
    pub keys: Vec<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct FileUploadRequest {
    #[serde(default)]
    pub prefix: String,

    #[validate(length(min = 1, max = 255, message = "File name must be 1-255 characters"))]
    pub file_name: String,

    #[validate(length(min = 1, max = 100, message = "Content type is required"))]
    pub content_type: String,
}
