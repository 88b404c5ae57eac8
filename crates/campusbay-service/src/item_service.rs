//! Listing service trait definition.

use crate::dto::{
    CreateItemRequest, DeleteItemResponse, ItemActionResponse, ItemDetailResponse,
    ItemListResponse, ListItemsQuery, UpdateItemRequest,
};
use async_trait::async_trait;
use campusbay_core::{CampusBayResult, Interface, ItemId, PageRequest, UserId};

/// Listing service trait.
///
/// Every status-changing operation is a compare-and-set against the status
/// the decision was made on, so concurrent buyers cannot both win.
#[async_trait]
pub trait ItemService: Interface + Send + Sync {
    /// Lists a new item for `seller_id`. New items start out AVAILABLE.
    async fn create_item(
        &self,
        seller_id: UserId,
        request: CreateItemRequest,
    ) -> CampusBayResult<ItemActionResponse>;

    /// Searches visible listings.
    async fn list_items(&self, query: ListItemsQuery) -> CampusBayResult<ItemListResponse>;

    /// Lists the caller's own items in every status.
    async fn list_own_items(
        &self,
        seller_id: UserId,
        page: PageRequest,
    ) -> CampusBayResult<ItemListResponse>;

    /// Gets an item and counts the view.
    async fn get_item(&self, id: ItemId) -> CampusBayResult<ItemDetailResponse>;

    /// Edits listing fields. Seller only.
    async fn update_item(
        &self,
        id: ItemId,
        actor: UserId,
        request: UpdateItemRequest,
    ) -> CampusBayResult<ItemDetailResponse>;

    async fn mark_sold(&self, id: ItemId, actor: UserId) -> CampusBayResult<ItemActionResponse>;

    async fn mark_reserved(&self, id: ItemId, actor: UserId) -> CampusBayResult<ItemActionResponse>;

    async fn mark_available(&self, id: ItemId, actor: UserId) -> CampusBayResult<ItemActionResponse>;

    /// A non-seller buys the item.
    async fn purchase(&self, id: ItemId, buyer: UserId) -> CampusBayResult<ItemActionResponse>;

    /// Legacy toggle between AVAILABLE and SOLD.
    async fn toggle_status(&self, id: ItemId, actor: UserId) -> CampusBayResult<ItemDetailResponse>;

    /// Soft-deletes an item. Seller only.
    async fn delete_item(&self, id: ItemId, actor: UserId) -> CampusBayResult<DeleteItemResponse>;
}
