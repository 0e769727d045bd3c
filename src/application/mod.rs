//! Application layer services implementing business logic.
//!
//! Services coordinate repositories, object storage and the storefront cache.
//! They hold trait objects so handlers and tests can swap implementations.
//!
//! # Available Services
//!
//! - [`services::CategoryService`] - Category CRUD, slugs, delete guard, images
//! - [`services::ItemService`] - Item CRUD, SKU and price rules, images
//! - [`services::ImageService`] - Presigned entity image uploads
//! - [`services::FileManagerService`] - Bucket browsing, folders, renames, deletes
//! - [`services::StorefrontService`] - Cached public reads and revalidation
//! - [`services::AuthService`] - API token authentication

pub mod services;
