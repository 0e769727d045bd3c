//! HTML template rendering handlers for the web admin.

mod catalog;
mod dashboard;
mod files;
mod login;

pub use catalog::{categories_page_handler, items_page_handler};
pub use dashboard::dashboard_handler;
pub use files::files_page_handler;
pub use login::login_handler;
