//! Dashboard home page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{extract::State, response::IntoResponse};

use crate::domain::entities::Catalog;
use crate::domain::repositories::CatalogSummary;
use crate::state::AppState;

/// Counts of one catalog; `available` is false when they could not be loaded.
pub struct CatalogCard {
    pub name: &'static str,
    pub available: bool,
    pub summary: CatalogSummary,
}

/// Renders `templates/dashboard.html` with one card per catalog.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub catalogs: Vec<CatalogCard>,
}

/// Renders the dashboard home page.
///
/// # Endpoint
///
/// `GET /admin`
///
/// A failing count query is logged and the card shows a placeholder; the
/// page itself always renders.
pub async fn dashboard_handler(State(state): State<AppState>) -> impl IntoResponse {
    let mut catalogs = Vec::with_capacity(Catalog::ALL.len());

    for catalog in Catalog::ALL {
        let card = match state.category_service.summary(catalog).await {
            Ok(summary) => CatalogCard {
                name: catalog.as_str(),
                available: true,
                summary,
            },
            Err(e) => {
                tracing::warn!("Failed to load {} summary: {}", catalog, e);
                CatalogCard {
                    name: catalog.as_str(),
                    available: false,
                    summary: CatalogSummary::default(),
                }
            }
        };
        catalogs.push(card);
    }

    DashboardTemplate { catalogs }
}
