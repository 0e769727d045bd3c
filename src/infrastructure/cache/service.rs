//! Cache service trait and error types.

use async_trait::async_trait;

/// Errors raised by a cache backend.
///
/// Callers log these and carry on as if the cache were empty.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("cache connection error: {0}")]
    ConnectionError(String),

    #[error("cache operation error: {0}")]
    OperationError(String),
}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// String cache with TTLs and prefix invalidation.
///
/// Implementations must fail open: a broken backend behaves like an empty
/// cache and never fails the request that touched it.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::RedisCache`] - Redis-backed cache with TTL support
/// - [`crate::infrastructure::cache::NullCache`] - No-op implementation for disabled caching
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheService: Send + Sync {
    /// Returns the cached value, `Ok(None)` on miss or backend error.
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    /// Stores a value. `ttl_seconds = None` uses the implementation default.
    async fn set(&self, key: &str, value: &str, ttl_seconds: Option<u64>) -> CacheResult<()>;

    /// Removes every key starting with `prefix` and returns how many were dropped.
    async fn invalidate_prefix(&self, prefix: &str) -> CacheResult<u64>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;
}
