//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer.
//!
//! # Modules
//!
//! - [`cache`] - Storefront response cache (Redis and no-op implementations)
//! - [`persistence`] - PostgreSQL repository implementations
//! - [`storage`] - S3-compatible object storage client

pub mod cache;
pub mod persistence;
pub mod storage;
