//! Process-local cache backend.

use super::CacheInterface;
use async_trait::async_trait;
use campusbay_core::CampusBayResult;
use parking_lot::RwLock;
use shaku::Component;
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tracing::debug;

#[derive(Debug, Clone)]
pub struct CacheEntry {
    value: String,
    expires_at: Instant,
}

impl CacheEntry {
    fn is_live(&self, now: Instant) -> bool {
        self.expires_at > now
    }
}

/// In-memory cache for single-instance deployments and tests.
///
/// Expired entries are dropped lazily on access and on pattern deletes.
#[derive(Component, Default)]
#[shaku(interface = CacheInterface)]
pub struct MemoryCache {
    #[shaku(default)]
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl MemoryCache {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live entries.
    #[must_use]
    pub fn len(&self) -> usize {
        let now = Instant::now();
        self.entries.read().values().filter(|e| e.is_live(now)).count()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl CacheInterface for MemoryCache {
    async fn get_raw(&self, key: &str) -> CampusBayResult<Option<String>> {
        let now = Instant::now();
        let value = {
            let entries = self.entries.read();
            match entries.get(key) {
                Some(entry) if entry.is_live(now) => Some(entry.value.clone()),
                Some(_) => None,
                None => return Ok(None),
            }
        };

        if value.is_none() {
            // Re-check under the write lock; a writer may have refreshed it.
            let mut entries = self.entries.write();
            if entries.get(key).is_some_and(|e| !e.is_live(now)) {
                entries.remove(key);
            }
        }
        Ok(value)
    }

    async fn set_raw(&self, key: &str, value: &str, ttl: Duration) -> CampusBayResult<()> {
        let entry = CacheEntry {
            value: value.to_string(),
            expires_at: Instant::now() + ttl,
        };
        self.entries.write().insert(key.to_string(), entry);
        debug!("Cached key '{}' for {}s", key, ttl.as_secs());
        Ok(())
    }

    async fn delete(&self, key: &str) -> CampusBayResult<bool> {
        let now = Instant::now();
        Ok(self
            .entries
            .write()
            .remove(key)
            .is_some_and(|e| e.is_live(now)))
    }

    async fn exists(&self, key: &str) -> CampusBayResult<bool> {
        let now = Instant::now();
        Ok(self.entries.read().get(key).is_some_and(|e| e.is_live(now)))
    }

    async fn delete_pattern(&self, pattern: &str) -> CampusBayResult<u64> {
        let now = Instant::now();
        let mut deleted = 0u64;
        self.entries.write().retain(|key, entry| {
            if !entry.is_live(now) {
                return false;
            }
            if glob_match(pattern, key) {
                deleted += 1;
                return false;
            }
            true
        });
        debug!("Deleted {} keys matching pattern '{}'", deleted, pattern);
        Ok(deleted)
    }

    fn is_enabled(&self) -> bool {
        true
    }
}

/// Matches `key` against a pattern where `*` stands for any run of characters.
fn glob_match(pattern: &str, key: &str) -> bool {
    let mut parts = pattern.split('*');
    let Some(first) = parts.next() else {
        return key.is_empty();
    };
    let Some(mut rest) = key.strip_prefix(first) else {
        return false;
    };

    let parts: Vec<&str> = parts.collect();
    let Some((last, middle)) = parts.split_last() else {
        // No wildcard at all.
        return rest.is_empty();
    };

    for part in middle {
        match rest.find(part) {
            Some(pos) => rest = &rest[pos + part.len()..],
            None => return false,
        }
    }
    rest.ends_with(last)
}
