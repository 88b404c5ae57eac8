//! Cache-first lookup of user summaries.
//!
//! Item and message responses embed the public profile of every user they
//! mention. Summaries are read from the cache and only the misses go to the
//! repository, in a single batched query.

use crate::cache::{cache_keys, CacheExt, CacheInterface};
use crate::dto::UserSummary;
use campusbay_core::{CampusBayResult, UserId};
use campusbay_repository::UserRepository;
use std::collections::{HashMap, HashSet};
use std::time::Duration;
use tracing::{debug, warn};

/// Resolves [`UserSummary`] values for a set of user IDs.
pub struct UserSummaries<'a> {
    users: &'a dyn UserRepository,
    cache: &'a dyn CacheInterface,
    ttl: Duration,
}

impl<'a> UserSummaries<'a> {
    #[must_use]
    pub fn new(users: &'a dyn UserRepository, cache: &'a dyn CacheInterface, ttl: Duration) -> Self {
        Self { users, cache, ttl }
    }

    /// Loads summaries for `ids`. Unknown users are absent from the map.
    ///
    /// Cache failures degrade to repository reads.
    pub async fn load(
        &self,
        ids: impl IntoIterator<Item = UserId> + Send,
    ) -> CampusBayResult<HashMap<UserId, UserSummary>> {
        let wanted: HashSet<UserId> = ids.into_iter().collect();
        let mut found = HashMap::with_capacity(wanted.len());
        let mut misses = Vec::new();

        for id in wanted {
            match self.cached(id).await {
                Some(summary) => {
                    found.insert(id, summary);
                }
                None => misses.push(id),
            }
        }

        if misses.is_empty() {
            return Ok(found);
        }

        debug!("Loading {} user summaries from the repository", misses.len());
        for user in self.users.find_by_ids(&misses).await? {
            let summary = UserSummary::from(&user);
            let _ = self
                .cache
                .set(&cache_keys::user_summary(user.id), &summary, self.ttl)
                .await;
            found.insert(user.id, summary);
        }

        Ok(found)
    }

    /// Loads a single summary.
    pub async fn load_one(&self, id: UserId) -> CampusBayResult<Option<UserSummary>> {
        Ok(self.load([id]).await?.remove(&id))
    }

    async fn cached(&self, id: UserId) -> Option<UserSummary> {
        if !self.cache.is_enabled() {
            return None;
        }
        match self.cache.get::<UserSummary>(&cache_keys::user_summary(id)).await {
            Ok(hit) => hit,
            Err(e) => {
                warn!("Ignoring cache error for user {}: {}", id, e);
                None
            }
        }
    }
}

/// Drops every cached summary, e.g. after bulk data changes.
pub async fn evict_all(cache: &dyn CacheInterface) -> CampusBayResult<u64> {
    cache.delete_pattern(&cache_keys::user_summary_pattern()).await
}
