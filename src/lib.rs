//! # Catalog admin
//!
//! Admin backend for a product catalog and a service catalog, built with
//! Axum and PostgreSQL. Images and other media live in an S3-compatible
//! bucket (Cloudflare R2, MinIO, AWS S3) and are uploaded by the browser
//! through presigned URLs.
//!
//! ## Architecture
//!
//! - **Domain Layer** ([`domain`]) - Entities, list queries, repository and storage traits
//! - **Application Layer** ([`application`]) - Category, item, image, file and storefront services
//! - **Infrastructure Layer** ([`infrastructure`]) - PostgreSQL, S3 and Redis adapters
//! - **API Layer** ([`api`]) - JSON handlers, DTOs and middleware
//! - **Web Layer** ([`web`]) - Askama admin pages
//!
//! ## Features
//!
//! - Paginated, filterable, sortable category and item lists per catalog
//! - Unique slugs derived from names
//! - Presigned image uploads with a fixed key layout per record
//! - A file manager over the bucket with folders, rename and bulk delete
//! - Cached public storefront reads, revalidated on every admin change
//! - API token authentication managed by the `admin` CLI
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;
pub mod web;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
pub mod prelude {
    pub use crate::application::services::{
        AuthService, CategoryService, FileManagerService, ItemService, StorefrontService,
    };
    pub use crate::domain::entities::{Catalog, Category, Item};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
