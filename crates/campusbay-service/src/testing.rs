//! Hand-written in-memory repositories for service unit tests.

use async_trait::async_trait;
use campusbay_config::SecurityConfig;
use campusbay_core::{
    CampusBayError, CampusBayResult, ItemId, MessageId, Page, PageRequest, UserId,
};
use campusbay_domain::{
    AvailabilityStatus, Category, Email, Item, ListingSort, Message, NewItem, StatusChange, User,
    Wishlist,
};
use campusbay_repository::{
    ItemQuery, ItemRepository, MessageRepository, UserRepository, WishlistRepository,
};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub fn test_security_config() -> Arc<SecurityConfig> {
    Arc::new(SecurityConfig {
        jwt_secret: "test-secret-key-for-testing-only".to_string(),
        jwt_access_expiration_secs: 3600,
        jwt_refresh_expiration_secs: 604_800,
        jwt_issuer: "test-issuer".to_string(),
        jwt_audience: "test-audience".to_string(),
        password_hash_cost: 1,
    })
}

pub fn new_item(seller_id: UserId, title: &str, price: f64, category: Category) -> Item {
    Item::list(
        seller_id,
        NewItem {
            title: title.to_string(),
            description: format!("{title} in good condition"),
            price,
            category,
            location: None,
            images: vec![],
        },
    )
}

fn paginate<T: Clone>(rows: &[T], page: PageRequest) -> Page<T> {
    let start = usize::try_from(page.offset()).unwrap_or(usize::MAX);
    let items = rows
        .iter()
        .skip(start)
        .take(page.limit as usize)
        .cloned()
        .collect();
    Page::new(items, page, rows.len() as u64)
}

// ============ Users ============

#[derive(Default)]
pub struct MockUserRepository {
    users: Mutex<HashMap<UserId, User>>,
    batch_lookups: AtomicUsize,
}

impl MockUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, name: &str, email: &str) -> User {
        let user = User::register(
            name.to_string(),
            Email::new(email).unwrap(),
            "hashed_password".to_string(),
            Some("BMS College of Engineering".to_string()),
            "college.edu",
        );
        self.users.lock().unwrap().insert(user.id, user.clone());
        user
    }

    pub fn remove(&self, id: UserId) {
        self.users.lock().unwrap().remove(&id);
    }

    pub fn all(&self) -> Vec<User> {
        self.users.lock().unwrap().values().cloned().collect()
    }

    /// How many times `find_by_ids` was called.
    pub fn batch_lookups(&self) -> usize {
        self.batch_lookups.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl UserRepository for MockUserRepository {
    async fn find_by_id(&self, id: UserId) -> CampusBayResult<Option<User>> {
        Ok(self.users.lock().unwrap().get(&id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> CampusBayResult<Option<User>> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .find(|u| u.email == *email)
            .cloned())
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> CampusBayResult<Vec<User>> {
        self.batch_lookups.fetch_add(1, Ordering::SeqCst);
        let users = self.users.lock().unwrap();
        Ok(ids.iter().filter_map(|id| users.get(id).cloned()).collect())
    }

    async fn exists_by_email(&self, email: &Email) -> CampusBayResult<bool> {
        Ok(self.find_by_email(email).await?.is_some())
    }

    async fn save(&self, user: &User) -> CampusBayResult<User> {
        let mut users = self.users.lock().unwrap();
        if users.values().any(|u| u.email == user.email) {
            return Err(CampusBayError::conflict("Email already registered"));
        }
        users.insert(user.id, user.clone());
        Ok(user.clone())
    }

    async fn count(&self) -> CampusBayResult<u64> {
        Ok(self.users.lock().unwrap().len() as u64)
    }
}

// ============ Items ============

#[derive(Default)]
pub struct MockItemRepository {
    items: Mutex<HashMap<ItemId, Item>>,
    /// Statuses a competing writer installs just before our next CAS writes.
    competing_writes: Mutex<Vec<AvailabilityStatus>>,
}

impl MockItemRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, item: Item) -> Item {
        self.items.lock().unwrap().insert(item.id, item.clone());
        item
    }

    /// Reads an item even if it is soft-deleted.
    pub fn stored(&self, id: ItemId) -> Option<Item> {
        self.items.lock().unwrap().get(&id).cloned()
    }

    /// Makes the next status write lose to a writer that sets `status`.
    pub fn race_with(&self, status: AvailabilityStatus) {
        self.competing_writes.lock().unwrap().push(status);
    }

    fn visible(&self) -> Vec<Item> {
        self.items
            .lock()
            .unwrap()
            .values()
            .filter(|i| !i.is_deleted())
            .cloned()
            .collect()
    }
}

#[async_trait]
impl ItemRepository for MockItemRepository {
    async fn find_by_id(&self, id: ItemId) -> CampusBayResult<Option<Item>> {
        Ok(self.stored(id).filter(|i| !i.is_deleted()))
    }

    async fn find_by_ids(&self, ids: &[ItemId]) -> CampusBayResult<Vec<Item>> {
        Ok(self
            .visible()
            .into_iter()
            .filter(|i| ids.contains(&i.id))
            .collect())
    }

    async fn search(&self, query: &ItemQuery, page: PageRequest) -> CampusBayResult<Page<Item>> {
        let text = query.text.as_ref().map(|t| t.to_lowercase());
        let mut rows: Vec<Item> = self
            .visible()
            .into_iter()
            .filter(|i| query.status.status().map_or(true, |s| i.availability_status() == s))
            .filter(|i| query.category.map_or(true, |c| i.category == c))
            .filter(|i| {
                text.as_ref().map_or(true, |t| {
                    i.title.to_lowercase().contains(t) || i.description.to_lowercase().contains(t)
                })
            })
            .collect();

        match query.sort {
            ListingSort::Newest => rows.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
            ListingSort::Oldest => rows.sort_by(|a, b| a.created_at.cmp(&b.created_at)),
            ListingSort::PriceLow => rows.sort_by(|a, b| a.price.total_cmp(&b.price)),
            ListingSort::PriceHigh => rows.sort_by(|a, b| b.price.total_cmp(&a.price)),
            ListingSort::Popular => rows.sort_by(|a, b| b.view_count.cmp(&a.view_count)),
        }
        Ok(paginate(&rows, page))
    }

    async fn find_by_seller(&self, seller_id: UserId, page: PageRequest) -> CampusBayResult<Page<Item>> {
        let mut rows: Vec<Item> = self
            .visible()
            .into_iter()
            .filter(|i| i.seller_id == seller_id)
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(paginate(&rows, page))
    }

    async fn save(&self, item: &Item) -> CampusBayResult<Item> {
        Ok(self.insert(item.clone()))
    }

    async fn update(&self, item: &Item) -> CampusBayResult<bool> {
        let mut items = self.items.lock().unwrap();
        match items.get_mut(&item.id) {
            Some(stored) if !stored.is_deleted() => {
                let status = stored.availability_status();
                *stored = item.clone().with_status(status);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn transition_status(&self, id: ItemId, change: StatusChange) -> CampusBayResult<bool> {
        let competing = self.competing_writes.lock().unwrap().pop();
        let mut items = self.items.lock().unwrap();
        let Some(stored) = items.get_mut(&id) else {
            return Ok(false);
        };
        if let Some(status) = competing {
            *stored = stored.clone().with_status(status);
        }
        if stored.is_deleted() || stored.availability_status() != change.from {
            return Ok(false);
        }
        *stored = stored.clone().with_status(change.to);
        stored.updated_at = Utc::now();
        Ok(true)
    }

    async fn increment_views(&self, id: ItemId) -> CampusBayResult<bool> {
        let mut items = self.items.lock().unwrap();
        match items.get_mut(&id) {
            Some(item) if !item.is_deleted() => {
                item.view_count += 1;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn soft_delete(&self, id: ItemId) -> CampusBayResult<bool> {
        let mut items = self.items.lock().unwrap();
        match items.get_mut(&id) {
            Some(item) if !item.is_deleted() => {
                item.deleted_at = Some(Utc::now());
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn count(&self) -> CampusBayResult<u64> {
        Ok(self.visible().len() as u64)
    }
}

// ============ Messages ============

#[derive(Default)]
pub struct MockMessageRepository {
    messages: Mutex<Vec<Message>>,
}

impl MockMessageRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn all(&self) -> Vec<Message> {
        self.messages.lock().unwrap().clone()
    }
}

#[async_trait]
impl MessageRepository for MockMessageRepository {
    async fn find_by_id(&self, id: MessageId) -> CampusBayResult<Option<Message>> {
        Ok(self.all().into_iter().find(|m| m.id == id))
    }

    async fn save(&self, message: &Message) -> CampusBayResult<Message> {
        self.messages.lock().unwrap().push(message.clone());
        Ok(message.clone())
    }

    async fn recent_for_user(&self, user_id: UserId, limit: u32) -> CampusBayResult<Vec<Message>> {
        Ok(self
            .all()
            .into_iter()
            .rev()
            .filter(|m| m.involves(user_id))
            .take(limit as usize)
            .collect())
    }

    async fn thread(&self, user_id: UserId, other_id: UserId) -> CampusBayResult<Vec<Message>> {
        Ok(self
            .all()
            .into_iter()
            .filter(|m| m.involves(user_id) && m.involves(other_id))
            .collect())
    }

    async fn mark_read(&self, id: MessageId) -> CampusBayResult<bool> {
        let mut messages = self.messages.lock().unwrap();
        Ok(messages
            .iter_mut()
            .find(|m| m.id == id)
            .map(|m| m.read = true)
            .is_some())
    }

    async fn mark_thread_read(&self, recipient_id: UserId, sender_id: UserId) -> CampusBayResult<u64> {
        let mut changed = 0;
        for message in self.messages.lock().unwrap().iter_mut() {
            if message.recipient_id == recipient_id && message.sender_id == sender_id && !message.read {
                message.read = true;
                changed += 1;
            }
        }
        Ok(changed)
    }

    async fn unread_count(&self, user_id: UserId) -> CampusBayResult<u64> {
        Ok(self
            .all()
            .iter()
            .filter(|m| m.recipient_id == user_id && !m.read)
            .count() as u64)
    }
}

// ============ Wishlists ============

#[derive(Default)]
pub struct MockWishlistRepository {
    wishlists: Mutex<HashMap<UserId, Wishlist>>,
}

impl MockWishlistRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WishlistRepository for MockWishlistRepository {
    async fn get_or_create(&self, user_id: UserId) -> CampusBayResult<Wishlist> {
        Ok(self
            .wishlists
            .lock()
            .unwrap()
            .entry(user_id)
            .or_insert_with(|| Wishlist::empty(user_id))
            .clone())
    }

    async fn find_by_user(&self, user_id: UserId) -> CampusBayResult<Option<Wishlist>> {
        Ok(self.wishlists.lock().unwrap().get(&user_id).cloned())
    }

    async fn add_item(&self, user_id: UserId, item_id: ItemId) -> CampusBayResult<bool> {
        let mut wishlists = self.wishlists.lock().unwrap();
        let wishlist = wishlists
            .entry(user_id)
            .or_insert_with(|| Wishlist::empty(user_id));
        Ok(wishlist.add(item_id).is_ok())
    }

    async fn remove_item(&self, user_id: UserId, item_id: ItemId) -> CampusBayResult<bool> {
        Ok(self
            .wishlists
            .lock()
            .unwrap()
            .get_mut(&user_id)
            .is_some_and(|w| w.remove(item_id)))
    }

    async fn contains(&self, user_id: UserId, item_id: ItemId) -> CampusBayResult<bool> {
        Ok(self
            .wishlists
            .lock()
            .unwrap()
            .get(&user_id)
            .is_some_and(|w| w.contains(item_id)))
    }
}
