//! Bearer token gate for `/api`.

use axum::{
    extract::{FromRequestParts, Request, State},
    middleware::Next,
    response::Response,
};
use axum_auth::AuthBearer;

use crate::{error::AppError, state::AppState};

/// Rejects API requests without a valid admin token.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// The token is hashed with the signing secret and looked up in
/// `api_tokens`; revoked tokens fail. A successful check bumps
/// `last_used_at`.
///
/// # Errors
///
/// Returns `401 Unauthorized` if the header is missing or malformed, or the
/// token is unknown or revoked.
pub async fn layer(
    State(st): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let (mut parts, body) = req.into_parts();

    let AuthBearer(token) = AuthBearer::from_request_parts(&mut parts, &())
        .await
        .map_err(|_| {
            AppError::unauthorized(
                "Unauthorized",
                serde_json::json!({"reason": "Authorization header is missing or invalid"}),
            )
        })?;

    let req = Request::from_parts(parts, body);

    st.auth_service.authenticate(&token).await?;

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::handlers::test_support::{SIGNING_SECRET, StateBuilder};
    use crate::application::services::auth_service::hash_token;
    use axum::{Router, http::StatusCode, middleware, routing::get};
    use axum_test::TestServer;
    use mockall::predicate::eq;

    fn server(builder: StateBuilder) -> TestServer {
        let state = builder.build();
        let app = Router::new()
            .route("/ping", get(|| async { "pong" }))
            .route_layer(middleware::from_fn_with_state(state.clone(), layer))
            .with_state(state);
        TestServer::new(app).unwrap()
    }

    #[tokio::test]
    async fn test_missing_header_is_401() {
        let mut builder = StateBuilder::new();
        builder.tokens.expect_validate_token().never();

        let response = server(builder).get("/ping").await;

        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_unknown_token_is_401() {
        let mut builder = StateBuilder::new();
        builder
            .tokens
            .expect_validate_token()
            .returning(|_| Ok(false));

        let response = server(builder)
            .get("/ping")
            .authorization_bearer("nope")
            .await;

        response.assert_status(StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_valid_token_passes() {
        let hash = hash_token(SIGNING_SECRET, "secret-token").unwrap();

        let mut builder = StateBuilder::new();
        builder
            .tokens
            .expect_validate_token()
            .with(eq(hash.clone()))
            .returning(|_| Ok(true));
        builder
            .tokens
            .expect_update_last_used()
            .with(eq(hash))
            .times(1)
            .returning(|_| Ok(()));

        let response = server(builder)
            .get("/ping")
            .authorization_bearer("secret-token")
            .await;

        response.assert_status_ok();
        response.assert_text("pong");
    }
}
