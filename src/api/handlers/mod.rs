//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod categories;
pub mod files;
pub mod health;
pub mod items;
pub mod storefront;

#[cfg(test)]
pub(crate) mod test_support;

pub use categories::{
    bulk_delete_categories_handler, category_image_upload_url_handler, category_options_handler,
    confirm_category_image_handler, create_category_handler, delete_category_handler,
    delete_category_image_handler, get_category_handler, list_categories_handler,
    toggle_category_active_handler, toggle_category_featured_handler, update_category_handler,
};
pub use files::{
    create_folder_handler, delete_files_handler, file_download_url_handler,
    file_upload_url_handler, list_files_handler, rename_file_handler,
};
pub use health::health_handler;
pub use items::{
    bulk_delete_items_handler, confirm_item_image_handler, create_item_handler,
    delete_item_handler, delete_item_image_handler, get_item_handler,
    item_image_upload_url_handler, list_items_handler, toggle_item_active_handler,
    toggle_item_featured_handler, update_item_handler,
};
pub use storefront::{
    storefront_categories_handler, storefront_category_handler, storefront_featured_handler,
};
