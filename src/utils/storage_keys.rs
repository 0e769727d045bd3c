//! Bucket key layout and validation.
//!
//! Entity images live at
//! `public/{catalog}/{catalog}-{categories|items}/{id}.{ext}`; folder keys end
//! with `/`.

use serde_json::json;

use crate::domain::entities::{Catalog, ImageOwner};
use crate::error::AppError;

pub const MAX_KEY_BYTES: usize = 1024;
pub const MAX_NAME_BYTES: usize = 255;

/// Accepted image content types and the extension each one is stored with.
pub const IMAGE_CONTENT_TYPES: [(&str, &str); 5] = [
    ("image/jpeg", "jpg"),
    ("image/png", "png"),
    ("image/webp", "webp"),
    ("image/gif", "gif"),
    ("image/avif", "avif"),
];

/// Folder holding every image of one owner kind in a catalog.
pub fn image_prefix(catalog: Catalog, owner: ImageOwner) -> String {
    format!("public/{0}/{0}-{1}/", catalog.as_str(), owner.as_str())
}

/// Key of the image for one record, e.g. `public/products/products-items/7.png`.
pub fn image_key(catalog: Catalog, owner: ImageOwner, id: i64, extension: &str) -> String {
    format!("{}{}.{}", image_prefix(catalog, owner), id, extension)
}

/// Checks that `key` is the image key of record `id` for any accepted extension.
pub fn is_image_key_for(catalog: Catalog, owner: ImageOwner, id: i64, key: &str) -> bool {
    IMAGE_CONTENT_TYPES
        .iter()
        .any(|(_, ext)| key == image_key(catalog, owner, id, ext))
}

/// Maps an image content type to its stored extension.
pub fn extension_for_content_type(content_type: &str) -> Option<&'static str> {
    let essence = content_type
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    IMAGE_CONTENT_TYPES
        .iter()
        .find(|(ct, _)| *ct == essence)
        .map(|(_, ext)| *ext)
}

/// Validates an object or folder key.
///
/// # Errors
///
/// Returns [`AppError::Validation`] for empty or oversized keys, a leading
/// `/`, empty segments, `.`/`..` segments and control characters.
pub fn validate_key(key: &str) -> Result<(), AppError> {
    if key.is_empty() || key.len() > MAX_KEY_BYTES {
        return Err(AppError::bad_request(
            "Invalid key length",
            json!({ "min": 1, "max": MAX_KEY_BYTES }),
        ));
    }

    if key.starts_with('/') {
        return Err(AppError::bad_request(
            "Key must not start with '/'",
            json!({ "key": key }),
        ));
    }

    if key.chars().any(char::is_control) {
        return Err(AppError::bad_request(
            "Key contains control characters",
            json!({ "key": key }),
        ));
    }

    let body = key.strip_suffix('/').unwrap_or(key);
    if body
        .split('/')
        .any(|segment| segment.is_empty() || segment == "." || segment == "..")
    {
        return Err(AppError::bad_request(
            "Key contains an empty or relative segment",
            json!({ "key": key }),
        ));
    }

    Ok(())
}

/// Validates a listing prefix: empty (bucket root) or a folder key.
pub fn validate_prefix(prefix: &str) -> Result<(), AppError> {
    if prefix.is_empty() {
        return Ok(());
    }

    if !prefix.ends_with('/') {
        return Err(AppError::bad_request(
            "Prefix must end with '/'",
            json!({ "prefix": prefix }),
        ));
    }

    validate_key(prefix)
}

/// Validates a single file or folder name.
pub fn validate_name(name: &str) -> Result<(), AppError> {
    if name.is_empty() || name.len() > MAX_NAME_BYTES {
        return Err(AppError::bad_request(
            "Invalid name length",
            json!({ "min": 1, "max": MAX_NAME_BYTES }),
        ));
    }

    if name.contains('/') || name == "." || name == ".." || name.chars().any(char::is_control) {
        return Err(AppError::bad_request(
            "Invalid name",
            json!({ "name": name, "hint": "Names cannot contain '/' or be '.' or '..'" }),
        ));
    }

    Ok(())
}

/// Returns the prefix enclosing `key`; `""` for top-level keys.
pub fn parent_prefix(key: &str) -> String {
    let body = key.strip_suffix('/').unwrap_or(key);
    match body.rfind('/') {
        Some(pos) => body[..=pos].to_string(),
        None => String::new(),
    }
}

/// Last segment of a key without a trailing `/`.
pub fn last_segment(key: &str) -> &str {
    let body = key.strip_suffix('/').unwrap_or(key);
    body.rsplit('/').next().unwrap_or(body)
}

pub fn is_folder_key(key: &str) -> bool {
    key.ends_with('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_key_layout() {
        assert_eq!(
            image_key(Catalog::Products, ImageOwner::Category, 12, "webp"),
            "public/products/products-categories/12.webp"
        );
        assert_eq!(
            image_key(Catalog::Services, ImageOwner::Item, 3, "png"),
            "public/services/services-items/3.png"
        );
    }

    #[test]
    fn test_is_image_key_for() {
        let key = "public/products/products-items/7.jpg";
        assert!(is_image_key_for(Catalog::Products, ImageOwner::Item, 7, key));
        assert!(!is_image_key_for(Catalog::Products, ImageOwner::Item, 8, key));
        assert!(!is_image_key_for(Catalog::Services, ImageOwner::Item, 7, key));
        assert!(!is_image_key_for(
            Catalog::Products,
            ImageOwner::Category,
            7,
            key
        ));
        assert!(!is_image_key_for(
            Catalog::Products,
            ImageOwner::Item,
            7,
            "public/products/products-items/7.exe"
        ));
    }

    #[test]
    fn test_extension_for_content_type() {
        assert_eq!(extension_for_content_type("image/jpeg"), Some("jpg"));
        assert_eq!(extension_for_content_type("IMAGE/PNG"), Some("png"));
        assert_eq!(
            extension_for_content_type("image/webp; charset=binary"),
            Some("webp")
        );
        assert_eq!(extension_for_content_type("application/pdf"), None);
        assert_eq!(extension_for_content_type("image/svg+xml"), None);
    }

    #[test]
    fn test_validate_key() {
        assert!(validate_key("public/products/a.png").is_ok());
        assert!(validate_key("public/products/").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("/public/a.png").is_err());
        assert!(validate_key("public//a.png").is_err());
        assert!(validate_key("public/../secret").is_err());
        assert!(validate_key("public/./a").is_err());
        assert!(validate_key("public/a\nb").is_err());
        assert!(validate_key(&"a".repeat(MAX_KEY_BYTES + 1)).is_err());
    }

    #[test]
    fn test_validate_prefix() {
        assert!(validate_prefix("").is_ok());
        assert!(validate_prefix("public/").is_ok());
        assert!(validate_prefix("public").is_err());
    }

    #[test]
    fn test_validate_name() {
        assert!(validate_name("banner.png").is_ok());
        assert!(validate_name("new folder").is_ok());
        assert!(validate_name("").is_err());
        assert!(validate_name("a/b").is_err());
        assert!(validate_name("..").is_err());
    }

    #[test]
    fn test_parent_prefix() {
        assert_eq!(parent_prefix("public/products/a.png"), "public/products/");
        assert_eq!(parent_prefix("public/products/"), "public/");
        assert_eq!(parent_prefix("public/"), "");
        assert_eq!(parent_prefix("a.png"), "");
    }

    #[test]
    fn test_last_segment() {
        assert_eq!(last_segment("public/products/a.png"), "a.png");
        assert_eq!(last_segment("public/products/"), "products");
        assert_eq!(last_segment("a.png"), "a.png");
    }
}
