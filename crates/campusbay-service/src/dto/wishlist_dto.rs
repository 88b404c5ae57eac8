//! Wishlist DTOs.

use super::ItemResponse;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// The caller's saved items. Deleted listings are left out.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct WishlistResponse {
    pub items: Vec<ItemResponse>,
    pub count: usize,
}

/// Outcome of adding or removing a wishlist entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WishlistChangeResponse {
    pub message: String,
    pub wishlist_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WishlistCheckResponse {
    pub is_in_wishlist: bool,
}
