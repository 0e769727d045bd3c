//! Catalog category entity.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A category grouping items inside one catalog.
///
/// `item_count` is computed on read and is not a stored column.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub is_active: bool,
    pub is_featured: bool,
    pub item_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Minimal projection used by select inputs in the admin UI.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct CategoryOption {
    pub id: i64,
    pub name: String,
}

/// Input data for creating a category.
///
/// The slug is resolved by the service before the record reaches the
/// repository.
#[derive(Debug, Clone)]
pub struct NewCategory {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub is_active: bool,
    pub is_featured: bool,
}

/// Partial update for a category.
///
/// `None` leaves a field unchanged. For nullable columns the inner option
/// distinguishes "set" (`Some(Some(v))`) from "clear" (`Some(None)`).
#[derive(Debug, Clone, Default)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<Option<String>>,
    pub image: Option<Option<String>>,
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
}

impl CategoryPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.slug.is_none()
            && self.description.is_none()
            && self.image.is_none()
            && self.is_active.is_none()
            && self.is_featured.is_none()
    }
}
