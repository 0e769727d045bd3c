//! Request bodies for category create and update.

use serde::Deserialize;
use serde_with::serde_as;
use validator::Validate;

use crate::api::dto::validate_not_blank;
use crate::application::services::{CategoryChanges, CategoryInput};

/// Request body for `POST /api/{catalog}/categories`.
///
/// ```json
/// { "name": "Garden tools", "description": "…", "is_active": true, "is_featured": false }
/// ```
#[derive(Debug, Deserialize, Validate)]
pub struct CreateCategoryRequest {
    #[validate(
        length(min = 1, max = 255, message = "Name must be 1-255 characters"),
        custom(function = "validate_not_blank")
    )]
    pub name: String,

    #[validate(length(max = 5000, message = "Description is too long"))]
    pub description: Option<String>,

    pub is_active: Option<bool>,

    pub is_featured: Option<bool>,
}

impl From<CreateCategoryRequest> for CategoryInput {
    fn from(req: CreateCategoryRequest) -> Self {
        CategoryInput {
            name: req.name.trim().to_string(),
            description: req.description,
            is_active: req.is_active.unwrap_or(true),
            is_featured: req.is_featured.unwrap_or(false),
        }
    }
}

/// Request body for `PATCH /api/{catalog}/categories/{id}`.
///
/// Absent fields are left alone; `"description": null` clears it.
#[serde_as]
#[derive(Debug, Default, Deserialize, Validate)]
pub struct UpdateCategoryRequest {
    #[validate(
        length(min = 1, max = 255, message = "Name must be 1-255 characters"),
        custom(function = "validate_not_blank")
    )]
    pub name: Option<String>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub description: Option<Option<String>>,

    pub is_active: Option<bool>,

    pub is_featured: Option<bool>,
}

impl From<UpdateCategoryRequest> for CategoryChanges {
    fn from(req: UpdateCategoryRequest) -> Self {
        CategoryChanges {
            name: req.name.map(|n| n.trim().to_string()),
            description: req.description,
            is_active: req.is_active,
            is_featured: req.is_featured,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_create_defaults() {
        let req: CreateCategoryRequest = serde_json::from_value(json!({"name": " Tools "})).unwrap();
        assert!(req.validate().is_ok());

        let input = CategoryInput::from(req);
        assert_eq!(input.name, "Tools");
        assert!(input.is_active);
        assert!(!input.is_featured);
    }

    #[test]
    fn test_blank_name_is_rejected() {
        let req: CreateCategoryRequest = serde_json::from_value(json!({"name": "   "})).unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_update_distinguishes_null_from_absent() {
        let absent: UpdateCategoryRequest = serde_json::from_value(json!({})).unwrap();
        assert_eq!(absent.description, None);

        let cleared: UpdateCategoryRequest =
            serde_json::from_value(json!({"description": null})).unwrap();
        assert_eq!(cleared.description, Some(None));

        let set: UpdateCategoryRequest =
            serde_json::from_value(json!({"description": "New"})).unwrap();
        assert_eq!(set.description, Some(Some("New".to_string())));
    }
}
