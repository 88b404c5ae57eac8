//! Cache key generators for consistent key naming.

use campusbay_core::UserId;

/// Prefix for all cache keys to namespace them.
const CACHE_PREFIX: &str = "campusbay:cache";

/// Generate a cache key for a user's public summary.
#[must_use]
pub fn user_summary(id: UserId) -> String {
    format!("{CACHE_PREFIX}:user:summary:{id}")
}

/// Pattern matching every cached user summary.
#[must_use]
pub fn user_summary_pattern() -> String {
    format!("{CACHE_PREFIX}:user:summary:*")
}
