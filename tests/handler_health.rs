mod common;

use axum_test::TestServer;
use catalog_admin::routes::router;
use sqlx::PgPool;
use std::sync::Arc;

#[sqlx::test(migrations = "./migrations")]
async fn test_health_endpoint_success(pool: PgPool) {
    let state = common::create_test_state(pool, Arc::new(common::MemoryStorage::default()));
    let server = TestServer::new(router(state)).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["database"]["status"], "ok");
    assert_eq!(json["checks"]["storage"]["status"], "ok");
    assert_eq!(json["checks"]["cache"]["status"], "ok");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_health_needs_no_token(pool: PgPool) {
    let state = common::create_test_state(pool, Arc::new(common::MemoryStorage::default()));
    let server = TestServer::new(router(state)).unwrap();

    let json = server.get("/health").await.json::<serde_json::Value>();

    assert!(json.get("version").is_some());
    assert!(json["checks"].get("database").is_some());
}
