//! Cache interface trait for abstracted caching operations.

use async_trait::async_trait;
use campusbay_core::{CampusBayResult, Interface};
use std::time::Duration;

/// Cache interface for storing and retrieving cached data.
///
/// Values are stored as JSON strings so the trait stays dyn-compatible.
#[async_trait]
pub trait CacheInterface: Interface + Send + Sync {
    /// Get a raw JSON value from the cache.
    ///
    /// Returns `None` if the key doesn't exist or has expired.
    async fn get_raw(&self, key: &str) -> CampusBayResult<Option<String>>;

    /// Set a raw JSON value in the cache with a TTL.
    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> CampusBayResult<()>;

    /// Delete a value from the cache.
    ///
    /// Returns `true` if the key existed and was deleted.
    async fn delete(&self, key: &str) -> CampusBayResult<bool>;

    /// Check if a key exists in the cache.
    async fn exists(&self, key: &str) -> CampusBayResult<bool>;

    /// Delete every key matching a glob pattern (`*` wildcards).
    ///
    /// Returns the number of keys deleted.
    async fn delete_pattern(&self, pattern: &str) -> CampusBayResult<u64>;

    /// Check if caching is enabled.
    fn is_enabled(&self) -> bool;
}

/// Typed convenience methods over [`CacheInterface`].
#[async_trait]
pub trait CacheExt: CacheInterface {
    /// Get a typed value from the cache.
    async fn get<T: serde::de::DeserializeOwned + Send>(&self, key: &str) -> CampusBayResult<Option<T>> {
        match self.get_raw(key).await? {
            Some(json) => {
                let value: T = serde_json::from_str(&json)?;
                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    /// Set a typed value in the cache.
    async fn set<T: serde::Serialize + Send + Sync>(
        &self,
        key: &str,
        value: &T,
        ttl: Duration,
    ) -> CampusBayResult<()> {
        let json = serde_json::to_string(value)?;
        self.set_raw(key, &json, ttl).await
    }
}

impl<T: CacheInterface + ?Sized> CacheExt for T {}
