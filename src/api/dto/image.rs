//! Request bodies for the category and item image endpoints.

use serde::Deserialize;
use validator::Validate;

/// Request body for `POST …/{id}/image/upload-url`.
///
/// `file_name` is informational; the stored key is fixed by the record and
/// its extension follows `content_type`.
#[derive(Debug, Deserialize, Validate)]
pub struct ImageUploadRequest {
    #[validate(length(max = 255, message = "File name is too long"))]
    pub file_name: Option<String>,

    #[validate(length(min = 1, max = 100, message = "Content type is required"))]
    pub content_type: String,
}

/// Request body for `PUT …/{id}/image`, sent after the browser upload.
#[derive(Debug, Deserialize, Validate)]
pub struct ConfirmImageRequest {
    #[validate(length(min = 1, max = 1024, message = "Key is required"))]
    pub key: String,
}
