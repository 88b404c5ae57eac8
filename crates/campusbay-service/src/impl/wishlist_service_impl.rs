//! Wishlist service implementation.

use crate::cache::{CacheInterface, DEFAULT_TTL};
use crate::dto::{WishlistChangeResponse, WishlistCheckResponse, WishlistResponse};
use crate::mappers::items_with_sellers;
use crate::user_summaries::UserSummaries;
use crate::wishlist_service::WishlistService;
use async_trait::async_trait;
use campusbay_core::{CampusBayError, CampusBayResult, ItemId, UserId};
use campusbay_domain::Item;
use campusbay_repository::{ItemRepository, UserRepository, WishlistRepository};
use shaku::Component;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Wishlist service component.
#[derive(Component)]
#[shaku(interface = WishlistService)]
pub struct WishlistServiceComponent {
    #[shaku(inject)]
    wishlist_repository: Arc<dyn WishlistRepository>,
    #[shaku(inject)]
    item_repository: Arc<dyn ItemRepository>,
    #[shaku(inject)]
    user_repository: Arc<dyn UserRepository>,
    #[shaku(inject)]
    cache: Arc<dyn CacheInterface>,
    #[shaku(default = DEFAULT_TTL)]
    summary_ttl: Duration,
}

impl WishlistServiceComponent {
    /// Saved items that are still visible, in the order they were saved.
    async fn visible_items(&self, saved: &[ItemId]) -> CampusBayResult<Vec<Item>> {
        if saved.is_empty() {
            return Ok(Vec::new());
        }
        let mut found: HashMap<ItemId, Item> = self
            .item_repository
            .find_by_ids(saved)
            .await?
            .into_iter()
            .map(|item| (item.id, item))
            .collect();
        Ok(saved.iter().filter_map(|id| found.remove(id)).collect())
    }

    async fn visible_count(&self, user_id: UserId) -> CampusBayResult<usize> {
        match self.wishlist_repository.find_by_user(user_id).await? {
            Some(wishlist) => Ok(self.visible_items(&wishlist.items).await?.len()),
            None => Ok(0),
        }
    }
}

#[async_trait]
impl WishlistService for WishlistServiceComponent {
    async fn get_wishlist(&self, user_id: UserId) -> CampusBayResult<WishlistResponse> {
        debug!("Loading wishlist for: {}", user_id);

        let wishlist = self.wishlist_repository.get_or_create(user_id).await?;
        let items = self.visible_items(&wishlist.items).await?;

        let sellers = UserSummaries::new(
            self.user_repository.as_ref(),
            self.cache.as_ref(),
            self.summary_ttl,
        )
        .load(items.iter().map(|item| item.seller_id).collect::<Vec<_>>())
        .await?;

        let items = items_with_sellers(items, &sellers);
        Ok(WishlistResponse {
            count: items.len(),
            items,
        })
    }

    async fn add_item(&self, user_id: UserId, item_id: ItemId) -> CampusBayResult<WishlistChangeResponse> {
        debug!("Adding item {} to wishlist of {}", item_id, user_id);

        if self.item_repository.find_by_id(item_id).await?.is_none() {
            return Err(CampusBayError::not_found("Item", item_id));
        }
        if !self.wishlist_repository.add_item(user_id, item_id).await? {
            return Err(CampusBayError::conflict("Item already in wishlist"));
        }

        info!("Item {} added to wishlist of {}", item_id, user_id);
        Ok(WishlistChangeResponse {
            message: "Item added to wishlist".to_string(),
            wishlist_count: self.visible_count(user_id).await?,
        })
    }

    async fn remove_item(
        &self,
        user_id: UserId,
        item_id: ItemId,
    ) -> CampusBayResult<WishlistChangeResponse> {
        debug!("Removing item {} from wishlist of {}", item_id, user_id);

        if self.wishlist_repository.find_by_user(user_id).await?.is_none() {
            return Err(CampusBayError::not_found("Wishlist", user_id));
        }
        if self.wishlist_repository.remove_item(user_id, item_id).await? {
            info!("Item {} removed from wishlist of {}", item_id, user_id);
        }

        Ok(WishlistChangeResponse {
            message: "Item removed from wishlist".to_string(),
            wishlist_count: self.visible_count(user_id).await?,
        })
    }

    async fn check_item(&self, user_id: UserId, item_id: ItemId) -> CampusBayResult<WishlistCheckResponse> {
        Ok(WishlistCheckResponse {
            is_in_wishlist: self.wishlist_repository.contains(user_id, item_id).await?,
        })
    }
}

impl std::fmt::Debug for WishlistServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WishlistServiceComponent").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCache;
    use crate::testing::{
        new_item, MockItemRepository, MockUserRepository, MockWishlistRepository,
    };
    use campusbay_domain::Category;

    struct Fixture {
        items: Arc<MockItemRepository>,
        users: Arc<MockUserRepository>,
        service: WishlistServiceComponent,
    }

    fn fixture() -> Fixture {
        let items = Arc::new(MockItemRepository::new());
        let users = Arc::new(MockUserRepository::new());
        let service = WishlistServiceComponent {
            wishlist_repository: Arc::new(MockWishlistRepository::new()),
            item_repository: items.clone(),
            user_repository: users.clone(),
            cache: Arc::new(MemoryCache::new()),
            summary_ttl: DEFAULT_TTL,
        };
        Fixture {
            items,
            users,
            service,
        }
    }

    #[tokio::test]
    async fn test_empty_wishlist_is_created_on_read() {
        let f = fixture();
        let user = f.users.insert("Priya", "priya@college.edu");

        let wishlist = f.service.get_wishlist(user.id).await.unwrap();
        assert_eq!(wishlist.count, 0);
        assert!(wishlist.items.is_empty());
    }

    #[tokio::test]
    async fn test_add_and_list_in_saved_order() {
        let f = fixture();
        let user = f.users.insert("Rahul", "rahul@college.edu");
        let seller = f.users.insert("Sneha", "sneha@college.edu");
        let first = f.items.insert(new_item(seller.id, "Drafter", 450.0, Category::Stationery));
        let second = f.items.insert(new_item(seller.id, "Lab Coat", 300.0, Category::Fashion));

        let added = f.service.add_item(user.id, second.id).await.unwrap();
        assert_eq!(added.message, "Item added to wishlist");
        assert_eq!(added.wishlist_count, 1);
        let added = f.service.add_item(user.id, first.id).await.unwrap();
        assert_eq!(added.wishlist_count, 2);

        let wishlist = f.service.get_wishlist(user.id).await.unwrap();
        let titles: Vec<&str> = wishlist.items.iter().map(|i| i.title.as_str()).collect();
        assert_eq!(titles, vec!["Lab Coat", "Drafter"]);
        assert_eq!(wishlist.items[0].seller.as_ref().unwrap().name, "Sneha");

        assert!(f.service.check_item(user.id, first.id).await.unwrap().is_in_wishlist);
    }

    #[tokio::test]
    async fn test_add_rejections() {
        let f = fixture();
        let user = f.users.insert("Karan", "karan@college.edu");
        let item = f.items.insert(new_item(user.id, "Kettle", 500.0, Category::Electronics));

        let err = f.service.add_item(user.id, ItemId::new()).await.unwrap_err();
        assert_eq!(err.status_code(), 404);

        f.service.add_item(user.id, item.id).await.unwrap();
        match f.service.add_item(user.id, item.id).await.unwrap_err() {
            CampusBayError::Conflict(message) => assert_eq!(message, "Item already in wishlist"),
            other => panic!("expected conflict, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_deleted_items_are_hidden_and_not_counted() {
        let f = fixture();
        let user = f.users.insert("Ananya", "ananya@college.edu");
        let seller = f.users.insert("Arjun", "arjun@college.edu");
        let kept = f.items.insert(new_item(seller.id, "Cycle", 3000.0, Category::General));
        let gone = f.items.insert(new_item(seller.id, "Helmet", 800.0, Category::General));

        f.service.add_item(user.id, kept.id).await.unwrap();
        f.service.add_item(user.id, gone.id).await.unwrap();
        f.items.soft_delete(gone.id).await.unwrap();

        let wishlist = f.service.get_wishlist(user.id).await.unwrap();
        assert_eq!(wishlist.count, 1);
        assert_eq!(wishlist.items[0].id, kept.id);
    }

    #[tokio::test]
    async fn test_remove_item() {
        let f = fixture();
        let user = f.users.insert("Meera", "meera@college.edu");
        let item = f.items.insert(new_item(user.id, "Guitar", 4000.0, Category::General));

        let err = f.service.remove_item(user.id, item.id).await.unwrap_err();
        assert_eq!(err.status_code(), 404);

        f.service.add_item(user.id, item.id).await.unwrap();
        let removed = f.service.remove_item(user.id, item.id).await.unwrap();
        assert_eq!(removed.message, "Item removed from wishlist");
        assert_eq!(removed.wishlist_count, 0);

        // Removing again is a no-op.
        let again = f.service.remove_item(user.id, item.id).await.unwrap();
        assert_eq!(again.wishlist_count, 0);
        assert!(!f.service.check_item(user.id, item.id).await.unwrap().is_in_wishlist);
    }
}
