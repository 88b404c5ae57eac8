//! Caching infrastructure for the service layer.
//!
//! The marketplace caches user summaries, which every item and message
//! response embeds. Backends: a process-local map, Redis, or nothing.

mod cache_interface;
pub mod cache_keys;
mod memory_cache;
mod redis_cache;

pub use cache_interface::{CacheExt, CacheInterface};
pub use memory_cache::{MemoryCache, MemoryCacheParameters};
pub use redis_cache::{create_redis_pool, RedisCache, RedisCacheParameters};

use std::time::Duration;

/// Default TTL for cached entries (5 minutes).
pub const DEFAULT_TTL: Duration = Duration::from_secs(300);
