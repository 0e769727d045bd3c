//! Cookie-based authentication middleware for the web admin.

use axum::{
    extract::{Request, State},
    http::header::COOKIE,
    middleware::Next,
    response::{Redirect, Response},
};

use crate::state::AppState;

pub const AUTH_COOKIE: &str = "auth_token";
pub const LOGIN_PATH: &str = "/admin/login";

/// Authenticates admin pages using the `auth_token` cookie.
///
/// The cookie holds the same token the API accepts as a Bearer token and is
/// checked with [`crate::application::services::AuthService`].
///
/// # Errors
///
/// Redirects to `/admin/login` when the cookie is missing or the token is
/// unknown or revoked.
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, Redirect> {
    let token = req
        .headers()
        .get(COOKIE)
        .and_then(|cookie_header| cookie_header.to_str().ok())
        .and_then(token_from_cookies);

    match token {
        Some(token) => match st.auth_service.authenticate(&token).await {
            Ok(()) => Ok(next.run(req).await),
            Err(_) => Err(Redirect::to(LOGIN_PATH)),
        },
        None => Err(Redirect::to(LOGIN_PATH)),
    }
}

/// Picks `auth_token` out of a `Cookie` header with any number of cookies.
fn token_from_cookies(header: &str) -> Option<String> {
    header.split(';').find_map(|cookie| {
        let (name, value) = cookie.trim().split_once('=')?;
        (name == AUTH_COOKIE && !value.is_empty()).then(|| value.to_string())
    })
}
