//! Data Transfer Objects for API requests and responses.
//!
//! Request bodies derive `validator::Validate`; handlers call `validate()`
//! before converting them into service inputs.

pub mod category;
pub mod files;
pub mod health;
pub mod image;
pub mod item;
pub mod list_query;
pub mod response;

pub use response::{ActionResponse, BulkDeleteRequest};

use validator::ValidationError;

/// Rejects names made only of whitespace.
pub fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank").with_message("Must not be blank".into()));
    }
    Ok(())
}
