//! Catalog discriminator shared by categories, items and image keys.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The two catalogs managed by the admin: products and services.
///
/// Both catalogs have identical shapes; the value selects the tables a
/// repository reads and the bucket folder images are stored under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Catalog {
    Products,
    Services,
}

impl Catalog {
    pub const ALL: [Catalog; 2] = [Catalog::Products, Catalog::Services];

    pub fn as_str(&self) -> &'static str {
        match self {
            Catalog::Products => "products",
            Catalog::Services => "services",
        }
    }

    pub fn categories_table(&self) -> &'static str {
        match self {
            Catalog::Products => "product_categories",
            Catalog::Services => "service_categories",
        }
    }

    pub fn items_table(&self) -> &'static str {
        match self {
            Catalog::Products => "product_items",
            Catalog::Services => "service_items",
        }
    }
}

impl fmt::Display for Catalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Kind of record an uploaded image belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageOwner {
    Category,
    Item,
}

impl ImageOwner {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImageOwner::Category => "categories",
            ImageOwner::Item => "items",
        }
    }
}
