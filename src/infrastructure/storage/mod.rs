//! Object storage backed by an S3-compatible service.
//!
//! - [`S3Storage`] - `aws-sdk-s3` client with path-style addressing, works
//!   against Cloudflare R2, MinIO and AWS S3

mod s3_storage;

pub use s3_storage::S3Storage;
