//! Objects and folders in the media bucket.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// A single object in the bucket.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoredObject {
    pub key: String,
    /// Last path segment of `key`.
    pub name: String,
    pub size: i64,
    pub last_modified: Option<DateTime<Utc>>,
    pub etag: Option<String>,
    /// Public URL the object is served from.
    pub url: String,
}

/// A common prefix one level below the listed prefix.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Folder {
    pub name: String,
    /// Full prefix including the trailing `/`.
    pub prefix: String,
}

impl Folder {
    /// Builds a folder from a prefix such as `public/products/`.
    pub fn from_prefix(prefix: impl Into<String>) -> Self {
        let prefix = prefix.into();
        let name = prefix
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default()
            .to_string();
        Self { name, prefix }
    }
}

/// One level of the bucket as shown by the file manager.
#[derive(Debug, Clone, Serialize)]
pub struct Listing {
    pub prefix: String,
    /// Prefix of the enclosing folder, `None` at the bucket root.
    pub parent: Option<String>,
    pub folders: Vec<Folder>,
    pub objects: Vec<StoredObject>,
}
