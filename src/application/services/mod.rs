//! Business logic services for the application layer.

pub mod auth_service;
pub mod bulk;
pub mod category_service;
pub mod file_manager_service;
pub mod image_service;
pub mod item_service;
pub mod storefront_service;

pub use auth_service::AuthService;
pub use bulk::{BulkDeleteReport, FailedId, FailedKey};
pub use category_service::{CategoryChanges, CategoryInput, CategoryService};
pub use file_manager_service::{FileManagerService, PresignedDownload, RenameResult};
pub use image_service::{ImageService, PresignedUpload};
pub use item_service::{ItemChanges, ItemInput, ItemService};
pub use storefront_service::StorefrontService;
