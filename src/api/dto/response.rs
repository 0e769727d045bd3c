//! Success envelope shared by every admin endpoint.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// `{ "success": "<message>", "data": ... }`
///
/// Failures never use this type; they render through
/// [`crate::error::AppError`] as `{ "error": { ... } }`.
#[derive(Debug, Serialize)]
pub struct ActionResponse<T> {
    pub success: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T: Serialize> ActionResponse<T> {
    pub fn new(message: impl Into<String>, data: T) -> Self {
        Self {
            success: message.into(),
            data: Some(data),
        }
    }
}

impl ActionResponse<()> {
    /// An envelope with a message and no payload.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: message.into(),
            data: None,
        }
    }
}

/// Request body for category and item bulk deletes.
#[derive(Debug, Deserialize, Validate)]
pub struct BulkDeleteRequest {
    #[validate(length(min = 1, max = 500, message = "Between 1 and 500 ids per request"))]
    pub ids: Vec<i64>,
}
