//! HTTP server initialization and runtime setup.
//!
//! Connects PostgreSQL, object storage and the cache, then serves the router.

use crate::config::Config;
use crate::domain::storage::ObjectStorage;
use crate::infrastructure::cache::{CacheService, NullCache, RedisCache};
use crate::infrastructure::storage::S3Storage;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - PostgreSQL connection pool
/// - Apply migrations
/// - S3-compatible object storage client
/// - Redis cache (or NullCache fallback)
/// - Axum HTTP server
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migrations fail
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.connect_timeout())
        .connect(&config.database.url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Connected to database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to migrate")?;

    let storage: Arc<dyn ObjectStorage> = Arc::new(S3Storage::from_config(&config.storage).await);
    if storage.health_check().await {
        tracing::info!("Object storage reachable (bucket '{}')", config.storage.bucket);
    } else {
        tracing::warn!(
            "Object storage bucket '{}' is not reachable yet",
            config.storage.bucket
        );
    }

    let cache: Arc<dyn CacheService> = if let Some(redis_url) = &config.cache.redis_url {
        match RedisCache::connect(redis_url, config.cache.ttl_seconds).await {
            Ok(redis) => {
                tracing::info!("Cache enabled (Redis)");
                Arc::new(redis)
            }
            Err(e) => {
                tracing::warn!("Failed to connect to Redis: {}. Using NullCache.", e);
                Arc::new(NullCache::new())
            }
        }
    } else {
        tracing::info!("Cache disabled (NullCache)");
        Arc::new(NullCache::new())
    };

    let state = AppState::new(
        pool,
        storage,
        cache,
        config.storage.presign_ttl(),
        config.token_signing_secret.clone(),
    );

    let app = app_router(state);

    let addr = config.listen_addr;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(listener, ServiceExt::<Request>::into_make_service(app))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutting down");
}
