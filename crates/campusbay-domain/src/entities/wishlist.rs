//! Wishlist entity.

use campusbay_core::{CampusBayError, CampusBayResult, ItemId, UserId, WishlistId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user's saved listings. Each user owns at most one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wishlist {
    pub id: WishlistId,
    pub user_id: UserId,
    /// Saved items in the order they were added.
    pub items: Vec<ItemId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Wishlist {
    /// Creates an empty wishlist for a user.
    #[must_use]
    pub fn empty(user_id: UserId) -> Self {
        let now = Utc::now();
        Self {
            id: WishlistId::new(),
            user_id,
            items: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[must_use]
    pub fn contains(&self, item_id: ItemId) -> bool {
        self.items.contains(&item_id)
    }

    /// Adds an item; a wishlist never holds the same item twice.
    pub fn add(&mut self, item_id: ItemId) -> CampusBayResult<()> {
        if self.contains(item_id) {
            return Err(CampusBayError::conflict("Item already in wishlist"));
        }
        self.items.push(item_id);
        self.updated_at = Utc::now();
        Ok(())
    }

    /// Removes an item. Returns whether it was present.
    pub fn remove(&mut self, item_id: ItemId) -> bool {
        let before = self.items.len();
        self.items.retain(|id| *id != item_id);
        let removed = self.items.len() != before;
        if removed {
            self.updated_at = Utc::now();
        }
        removed
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
