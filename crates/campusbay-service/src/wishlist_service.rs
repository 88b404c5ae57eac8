//! Wishlist service trait definition.

use crate::dto::{WishlistChangeResponse, WishlistCheckResponse, WishlistResponse};
use async_trait::async_trait;
use campusbay_core::{CampusBayResult, Interface, ItemId, UserId};

/// Wishlist service trait.
#[async_trait]
pub trait WishlistService: Interface + Send + Sync {
    /// The caller's wishlist, created on first access.
    async fn get_wishlist(&self, user_id: UserId) -> CampusBayResult<WishlistResponse>;

    /// Saves an item. Saving it twice is a conflict.
    async fn add_item(&self, user_id: UserId, item_id: ItemId) -> CampusBayResult<WishlistChangeResponse>;

    /// Removes an item. Removing an item that is not saved is a no-op.
    async fn remove_item(&self, user_id: UserId, item_id: ItemId)
        -> CampusBayResult<WishlistChangeResponse>;

    async fn check_item(&self, user_id: UserId, item_id: ItemId) -> CampusBayResult<WishlistCheckResponse>;
}
