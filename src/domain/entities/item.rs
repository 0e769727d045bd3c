//! Catalog item entity (a product or a service).

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// An item offered in a category.
///
/// `category_name` and `category_slug` are joined in on read.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct Item {
    pub id: i64,
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub image: Option<String>,
    pub price: Option<Decimal>,
    pub sku: Option<String>,
    pub is_active: bool,
    pub is_featured: bool,
    pub category_id: i64,
    pub category_name: String,
    pub category_slug: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input data for creating an item.
#[derive(Debug, Clone)]
pub struct NewItem {
    pub name: String,
    pub slug: String,
    pub description: Option<String>,
    pub price: Option<Decimal>,
    pub sku: Option<String>,
    pub is_active: bool,
    pub is_featured: bool,
    pub category_id: i64,
}

/// Partial update for an item. Same conventions as
/// [`crate::domain::entities::CategoryPatch`].
#[derive(Debug, Clone, Default)]
pub struct ItemPatch {
    pub name: Option<String>,
    pub slug: Option<String>,
    pub description: Option<Option<String>>,
    pub image: Option<Option<String>>,
    pub price: Option<Option<Decimal>>,
    pub sku: Option<Option<String>>,
    pub is_active: Option<bool>,
    pub is_featured: Option<bool>,
    pub category_id: Option<i64>,
}
