//! Category and item management pages.
//!
//! Both pages are shells; tables, filters and forms talk to
//! `/api/{catalog}/…` from `static/admin.js`.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::Path, response::IntoResponse};

use crate::domain::entities::Catalog;

#[derive(Template, WebTemplate)]
#[template(path = "categories.html")]
pub struct CategoriesTemplate {
    pub catalog: &'static str,
}

#[derive(Template, WebTemplate)]
#[template(path = "items.html")]
pub struct ItemsTemplate {
    pub catalog: &'static str,
}

/// # Endpoint
///
/// `GET /admin/{catalog}/categories`
pub async fn categories_page_handler(Path(catalog): Path<Catalog>) -> impl IntoResponse {
    CategoriesTemplate {
        catalog: catalog.as_str(),
    }
}

/// # Endpoint
///
/// `GET /admin/{catalog}/items`
pub async fn items_page_handler(Path(catalog): Path<Catalog>) -> impl IntoResponse {
    ItemsTemplate {
        catalog: catalog.as_str(),
    }
}
