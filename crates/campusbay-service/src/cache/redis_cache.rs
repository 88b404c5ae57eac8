//! Redis-based cache implementation.

use super::CacheInterface;
use async_trait::async_trait;
use campusbay_config::CacheConfig;
use campusbay_core::{CampusBayError, CampusBayResult, HealthCheck, HealthStatus};
use deadpool_redis::{redis::AsyncCommands, Config, Pool, Runtime};
use shaku::Component;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Creates a Redis connection pool from the cache configuration.
///
/// The pool connects lazily; an unreachable server surfaces as cache errors
/// on first use, which callers treat as misses.
pub fn create_redis_pool(config: &CacheConfig) -> CampusBayResult<Pool> {
    info!("Creating Redis connection pool for cache...");

    Config::from_url(&config.redis_url)
        .builder()
        .map_err(|e| CampusBayError::Configuration(format!("Invalid Redis config: {e}")))?
        .max_size(config.redis_pool_size)
        .runtime(Runtime::Tokio1)
        .build()
        .map_err(|e| CampusBayError::Cache(format!("Failed to create Redis pool: {e}")))
}

/// Redis-based cache service. Without a pool it behaves as a disabled cache.
#[derive(Component, Clone, Default)]
#[shaku(interface = CacheInterface)]
pub struct RedisCache {
    pool: Option<Arc<Pool>>,
}

impl RedisCache {
    /// Create a new Redis cache service.
    #[must_use]
    pub fn new(pool: Arc<Pool>) -> Self {
        Self { pool: Some(pool) }
    }

    /// Create a no-op cache service.
    #[must_use]
    pub fn disabled() -> Self {
        Self { pool: None }
    }

    async fn get_conn(&self) -> CampusBayResult<deadpool_redis::Connection> {
        match &self.pool {
            Some(pool) => pool
                .get()
                .await
                .map_err(|e| CampusBayError::Cache(format!("Failed to get Redis connection: {e}"))),
            None => Err(CampusBayError::Cache("Cache is disabled".to_string())),
        }
    }
}

impl std::fmt::Debug for RedisCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisCache")
            .field("enabled", &self.pool.is_some())
            .finish()
    }
}

#[async_trait]
impl CacheInterface for RedisCache {
    fn is_enabled(&self) -> bool {
        self.pool.is_some()
    }

    async fn get_raw(&self, key: &str) -> CampusBayResult<Option<String>> {
        if !self.is_enabled() {
            return Ok(None);
        }

        let mut conn = self.get_conn().await?;
        let value: Option<String> = conn
            .get(key)
            .await
            .map_err(|e| CampusBayError::Cache(format!("Failed to get key '{key}': {e}")))?;

        match &value {
            Some(_) => debug!("Cache hit for key '{}'", key),
            None => debug!("Cache miss for key '{}'", key),
        }

        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> CampusBayResult<()> {
        if !self.is_enabled() {
            return Ok(());
        }

        let mut conn = self.get_conn().await?;
        let ttl_secs = ttl.as_secs().max(1);

        conn.set_ex::<_, _, ()>(key, value, ttl_secs)
            .await
            .map_err(|e| CampusBayError::Cache(format!("Failed to set key '{key}': {e}")))?;

        debug!("Cached key '{}' with TTL {}s", key, ttl_secs);
        Ok(())
    }

    async fn delete(&self, key: &str) -> CampusBayResult<bool> {
        if !self.is_enabled() {
            return Ok(false);
        }

        let mut conn = self.get_conn().await?;
        let deleted: i64 = conn
            .del(key)
            .await
            .map_err(|e| CampusBayError::Cache(format!("Failed to delete key '{key}': {e}")))?;

        Ok(deleted > 0)
    }

    async fn exists(&self, key: &str) -> CampusBayResult<bool> {
        if !self.is_enabled() {
            return Ok(false);
        }

        let mut conn = self.get_conn().await?;
        conn.exists(key)
            .await
            .map_err(|e| CampusBayError::Cache(format!("Failed to check key '{key}': {e}")))
    }

    async fn delete_pattern(&self, pattern: &str) -> CampusBayResult<u64> {
        if !self.is_enabled() {
            return Ok(0);
        }

        let mut conn = self.get_conn().await?;

        // KEYS blocks the server; the summary key space is small.
        let keys: Vec<String> = deadpool_redis::redis::cmd("KEYS")
            .arg(pattern)
            .query_async(&mut conn)
            .await
            .map_err(|e| CampusBayError::Cache(format!("Failed to scan keys: {e}")))?;

        if keys.is_empty() {
            return Ok(0);
        }

        let deleted: u64 = conn
            .del(&keys)
            .await
            .map_err(|e| CampusBayError::Cache(format!("Failed to delete keys: {e}")))?;

        debug!("Deleted {} keys matching pattern '{}'", deleted, pattern);
        Ok(deleted)
    }
}

#[async_trait]
impl HealthCheck for RedisCache {
    fn name(&self) -> &str {
        "cache"
    }

    async fn check(&self) -> HealthStatus {
        if !self.is_enabled() {
            return HealthStatus::Degraded("cache disabled".to_string());
        }
        let mut conn = match self.get_conn().await {
            Ok(conn) => conn,
            Err(e) => return HealthStatus::Degraded(e.to_string()),
        };
        let pong: Result<String, _> = deadpool_redis::redis::cmd("PING").query_async(&mut conn).await;
        match pong {
            Ok(_) => HealthStatus::Healthy,
            // Lookups fall back to the database, so the service keeps working.
            Err(e) => HealthStatus::Degraded(format!("Redis unreachable: {e}")),
        }
    }
}
