//! Reports returned by bulk delete operations.

use serde::Serialize;

use crate::error::{AppError, ErrorInfo};

/// Outcome of deleting a batch of targets one by one.
///
/// A failure of one target never stops the batch.
#[derive(Debug, Clone, Serialize)]
pub struct BulkDeleteReport<F> {
    pub requested: usize,
    pub deleted: usize,
    pub failed: Vec<F>,
}

impl<F> BulkDeleteReport<F> {
    pub fn new(requested: usize) -> Self {
        Self {
            requested,
            deleted: 0,
            failed: Vec::new(),
        }
    }
}

/// A record that could not be deleted.
#[derive(Debug, Clone, Serialize)]
pub struct FailedId {
    pub id: i64,
    pub error: ErrorInfo,
}

impl FailedId {
    pub fn new(id: i64, error: &AppError) -> Self {
        Self {
            id,
            error: error.to_error_info(),
        }
    }
}

/// A bucket key that could not be deleted.
#[derive(Debug, Clone, Serialize)]
pub struct FailedKey {
    pub key: String,
    pub error: ErrorInfo,
}

impl FailedKey {
    pub fn new(key: impl Into<String>, error: &AppError) -> Self {
        Self {
            key: key.into(),
            error: error.to_error_info(),
        }
    }
}
