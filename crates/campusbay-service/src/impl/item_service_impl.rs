//! Listing service implementation.

use crate::cache::{CacheInterface, DEFAULT_TTL};
use crate::dto::{
    CreateItemRequest, DeleteItemResponse, ItemActionResponse, ItemDetailResponse,
    ItemListResponse, ItemResponse, ListItemsQuery, UpdateItemRequest,
};
use crate::item_service::ItemService;
use crate::mappers::items_with_sellers;
use crate::user_summaries::UserSummaries;
use async_trait::async_trait;
use campusbay_config::MarketplaceConfig;
use campusbay_core::{CampusBayError, CampusBayResult, ItemId, Page, PageRequest, UserId, ValidateExt};
use campusbay_domain::{Item, ListingSort, StatusChange, StatusFilter};
use campusbay_repository::{ItemQuery, ItemRepository, UserRepository};
use shaku::Component;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// How often a status change is retried after losing a race.
const MAX_STATUS_ATTEMPTS: usize = 3;

type Transition = fn(&mut Item, UserId) -> CampusBayResult<StatusChange>;

/// Listing service component.
#[derive(Component)]
#[shaku(interface = ItemService)]
pub struct ItemServiceComponent {
    #[shaku(inject)]
    item_repository: Arc<dyn ItemRepository>,
    #[shaku(inject)]
    user_repository: Arc<dyn UserRepository>,
    #[shaku(inject)]
    cache: Arc<dyn CacheInterface>,
    #[shaku(default)]
    marketplace: MarketplaceConfig,
    #[shaku(default = DEFAULT_TTL)]
    summary_ttl: Duration,
}

impl ItemServiceComponent {
    fn summaries(&self) -> UserSummaries<'_> {
        UserSummaries::new(self.user_repository.as_ref(), self.cache.as_ref(), self.summary_ttl)
    }

    async fn load_visible(&self, id: ItemId) -> CampusBayResult<Item> {
        self.item_repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| CampusBayError::not_found("Item", id))
    }

    async fn to_response(&self, item: Item) -> CampusBayResult<ItemResponse> {
        let seller = self.summaries().load_one(item.seller_id).await?;
        Ok(ItemResponse::with_seller(item, seller))
    }

    async fn to_list(&self, page: Page<Item>, sort: ListingSort) -> CampusBayResult<ItemListResponse> {
        let sellers = self
            .summaries()
            .load(page.items.iter().map(|item| item.seller_id).collect::<Vec<_>>())
            .await?;
        let Page { items, pagination } = page;
        Ok(ItemListResponse {
            items: items_with_sellers(items, &sellers),
            pagination,
            sort,
        })
    }

    /// Applies a status transition with compare-and-set semantics.
    ///
    /// The entity decides the transition against a fresh read; storage only
    /// applies it while the row still has that status. A lost race reloads
    /// and decides again, so the loser sees the rule the winner triggered.
    async fn change_status(
        &self,
        id: ItemId,
        actor: UserId,
        transition: Transition,
    ) -> CampusBayResult<Item> {
        for attempt in 1..=MAX_STATUS_ATTEMPTS {
            let mut item = self.load_visible(id).await?;
            let change = transition(&mut item, actor)?;

            if self.item_repository.transition_status(id, change).await? {
                info!("Item {} status {} -> {} by {}", id, change.from, change.to, actor);
                return Ok(item);
            }
            debug!("Status change on item {} lost a race (attempt {})", id, attempt);
        }

        Err(CampusBayError::conflict(
            "Item was modified concurrently, please retry",
        ))
    }

    async fn status_action(
        &self,
        id: ItemId,
        actor: UserId,
        transition: Transition,
        message: &str,
    ) -> CampusBayResult<ItemActionResponse> {
        let item = self.change_status(id, actor, transition).await?;
        Ok(ItemActionResponse::new(self.to_response(item).await?, message))
    }
}

#[async_trait]
impl ItemService for ItemServiceComponent {
    async fn create_item(
        &self,
        seller_id: UserId,
        request: CreateItemRequest,
    ) -> CampusBayResult<ItemActionResponse> {
        debug!("Creating item for seller: {}", seller_id);

        request.validate_request()?;
        let item = Item::list(seller_id, request.into_new_item()?);
        let saved = self.item_repository.save(&item).await?;

        info!("Item created: {} by {}", saved.id, seller_id);
        Ok(ItemActionResponse::new(
            self.to_response(saved).await?,
            "Item created successfully and marked as AVAILABLE",
        ))
    }

    async fn list_items(&self, query: ListItemsQuery) -> CampusBayResult<ItemListResponse> {
        debug!("Listing items: {:?}", query);

        query.validate_request()?;
        let sort = ListingSort::parse_lenient(query.sort.as_deref());
        let search = ItemQuery {
            text: query.text(),
            category: query.category()?,
            status: StatusFilter::parse_lenient(query.include_status.as_deref()),
            sort,
        };
        let page = PageRequest::new(
            query.page.unwrap_or(1),
            query.limit.unwrap_or(self.marketplace.default_page_size),
        );

        let items = self.item_repository.search(&search, page).await?;
        self.to_list(items, sort).await
    }

    async fn list_own_items(
        &self,
        seller_id: UserId,
        page: PageRequest,
    ) -> CampusBayResult<ItemListResponse> {
        debug!("Listing own items for: {}", seller_id);

        let items = self.item_repository.find_by_seller(seller_id, page).await?;
        self.to_list(items, ListingSort::Newest).await
    }

    async fn get_item(&self, id: ItemId) -> CampusBayResult<ItemDetailResponse> {
        debug!("Getting item: {}", id);

        let mut item = self.load_visible(id).await?;
        // Deleted between the read and the counter update.
        if !self.item_repository.increment_views(id).await? {
            return Err(CampusBayError::not_found("Item", id));
        }
        item.view_count += 1;

        Ok(ItemDetailResponse {
            item: self.to_response(item).await?,
        })
    }

    async fn update_item(
        &self,
        id: ItemId,
        actor: UserId,
        request: UpdateItemRequest,
    ) -> CampusBayResult<ItemDetailResponse> {
        debug!("Updating item {} by {}", id, actor);

        request.validate_request()?;
        let changes = request.into_changes()?;

        let mut item = self.load_visible(id).await?;
        item.apply_changes(actor, changes)?;
        if !self.item_repository.update(&item).await? {
            return Err(CampusBayError::not_found("Item", id));
        }

        // Status is owned by the transition path; reread so the response is current.
        let item = self.load_visible(id).await?;
        info!("Item updated: {}", id);
        Ok(ItemDetailResponse {
            item: self.to_response(item).await?,
        })
    }

    async fn mark_sold(&self, id: ItemId, actor: UserId) -> CampusBayResult<ItemActionResponse> {
        self.status_action(id, actor, Item::mark_sold, "Item successfully marked as SOLD")
            .await
    }

    async fn mark_reserved(&self, id: ItemId, actor: UserId) -> CampusBayResult<ItemActionResponse> {
        self.status_action(id, actor, Item::mark_reserved, "Item successfully marked as RESERVED")
            .await
    }

    async fn mark_available(&self, id: ItemId, actor: UserId) -> CampusBayResult<ItemActionResponse> {
        self.status_action(id, actor, Item::mark_available, "Item successfully marked as AVAILABLE")
            .await
    }

    async fn purchase(&self, id: ItemId, buyer: UserId) -> CampusBayResult<ItemActionResponse> {
        self.status_action(id, buyer, Item::purchase, "Purchase successful - item marked as SOLD")
            .await
    }

    async fn toggle_status(&self, id: ItemId, actor: UserId) -> CampusBayResult<ItemDetailResponse> {
        let item = self.change_status(id, actor, Item::toggle).await?;
        Ok(ItemDetailResponse {
            item: self.to_response(item).await?,
        })
    }

    async fn delete_item(&self, id: ItemId, actor: UserId) -> CampusBayResult<DeleteItemResponse> {
        debug!("Deleting item {} by {}", id, actor);

        let mut item = self.load_visible(id).await?;
        item.soft_delete(actor)?;
        if !self.item_repository.soft_delete(id).await? {
            return Err(CampusBayError::not_found("Item", id));
        }

        info!("Item deleted: {} by {}", id, actor);
        Ok(DeleteItemResponse {
            ok: true,
            message: "Item deleted successfully".to_string(),
        })
    }
}

impl std::fmt::Debug for ItemServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ItemServiceComponent")
            .field("summary_ttl", &self.summary_ttl)
            .finish_non_exhaustive()
    }
}
