//! Login page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;

/// Token form; the browser stores the token in the `auth_token` cookie.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
struct LoginTemplate {}

/// Renders the login page.
///
/// # Endpoint
///
/// `GET /admin/login`
///
/// Tokens are issued with `admin token create`; there is no password login.
pub async fn login_handler() -> impl IntoResponse {
    LoginTemplate {}
}
