//! Request bodies for item create and update.

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_with::serde_as;
use validator::Validate;

use crate::api::dto::validate_not_blank;
use crate::application::services::{ItemChanges, ItemInput};

/// Request body for `POST /api/{catalog}/items`.
///
/// `price` accepts a JSON number or a decimal string (`"19.90"`).
#[derive(Debug, Deserialize, Validate)]
pub struct CreateItemRequest {
    #[validate(
        length(min = 1, max = 255, message = "Name must be 1-255 characters"),
        custom(function = "validate_not_blank")
    )]
    pub name: String,

    #[validate(range(min = 1, message = "Invalid category id"))]
    pub category_id: i64,

    #[validate(length(max = 10000, message = "Description is too long"))]
    pub description: Option<String>,

    pub price: Option<Decimal>,

    #[validate(length(max = 64, message = "SKU must be at most 64 characters"))]
    pub sku: Option<String>,

    pub is_active: Option<bool>,

    pub is_featured: Option<bool>,
}

impl From<CreateItemRequest> for ItemInput {
    fn from(req: CreateItemRequest) -> Self {
        ItemInput {
            name: req.name.trim().to_string(),
            category_id: req.category_id,
            description: req.description,
            price: req.price,
            sku: req.sku,
            is_active: req.is_active.unwrap_or(true),
            is_featured: req.is_featured.unwrap_or(false),
        }
    }
}

/// Request body for `PATCH /api/{catalog}/items/{id}`.
///
/// `description`, `price` and `sku`: absent = unchanged, `null` = clear.
#[serde_as]
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateItemRequest {
    #[validate(
        length(min = 1, max = 255, message = "Name must be 1-255 characters"),
        custom(function = "validate_not_blank")
    )]
    pub name: Option<String>,

    #[validate(range(min = 1, message = "Invalid category id"))]
    pub category_id: Option<i64>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub description: Option<Option<String>>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub price: Option<Option<Decimal>>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub sku: Option<Option<String>>,

    pub is_active: Option<bool>,

    pub is_featured: Option<bool>,
}

impl From<UpdateItemRequest> for ItemChanges {
    fn from(req: UpdateItemRequest) -> Self {
        ItemChanges {
            name: req.name.map(|n| n.trim().to_string()),
            category_id: req.category_id,
            description: req.description,
            price: req.price,
            sku: req.sku,
            is_active: req.is_active,
            is_featured: req.is_featured,
        }
    }
}
