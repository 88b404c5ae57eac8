//! Repository trait definitions.

use async_trait::async_trait;
use campusbay_core::{
    CampusBayResult, Interface, ItemId, MessageId, Page, PageRequest, UserId,
};
use campusbay_domain::{Category, Email, Item, ListingSort, Message, StatusChange, StatusFilter, User, Wishlist};

/// User repository trait.
#[async_trait]
pub trait UserRepository: Interface + Send + Sync {
    /// Finds a user by ID.
    async fn find_by_id(&self, id: UserId) -> CampusBayResult<Option<User>>;

    /// Finds a user by email.
    async fn find_by_email(&self, email: &Email) -> CampusBayResult<Option<User>>;

    /// Finds every user whose ID is in `ids`. Unknown IDs are skipped.
    async fn find_by_ids(&self, ids: &[UserId]) -> CampusBayResult<Vec<User>>;

    /// Checks if an email is already registered.
    async fn exists_by_email(&self, email: &Email) -> CampusBayResult<bool>;

    /// Saves a new user. A duplicate email is a conflict.
    async fn save(&self, user: &User) -> CampusBayResult<User>;

    /// Counts all users.
    async fn count(&self) -> CampusBayResult<u64>;
}

/// Listing search filters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemQuery {
    /// Case-insensitive substring matched against title or description.
    pub text: Option<String>,
    pub category: Option<Category>,
    pub status: StatusFilter,
    pub sort: ListingSort,
}

/// Item repository trait.
///
/// Soft-deleted rows are invisible to every method.
#[async_trait]
pub trait ItemRepository: Interface + Send + Sync {
    /// Finds a visible item by ID.
    async fn find_by_id(&self, id: ItemId) -> CampusBayResult<Option<Item>>;

    /// Finds the visible items among `ids`, in no particular order.
    async fn find_by_ids(&self, ids: &[ItemId]) -> CampusBayResult<Vec<Item>>;

    /// Filters, sorts and paginates visible items.
    async fn search(&self, query: &ItemQuery, page: PageRequest) -> CampusBayResult<Page<Item>>;

    /// Lists a seller's items in every status, newest first.
    async fn find_by_seller(&self, seller_id: UserId, page: PageRequest)
        -> CampusBayResult<Page<Item>>;

    /// Saves a new item.
    async fn save(&self, item: &Item) -> CampusBayResult<Item>;

    /// Writes the editable fields of an item. Returns false if it is gone.
    async fn update(&self, item: &Item) -> CampusBayResult<bool>;

    /// Applies `change.to` only while the row still has status `change.from`.
    ///
    /// Returns false when another writer got there first or the item was
    /// deleted in the meantime.
    async fn transition_status(&self, id: ItemId, change: StatusChange) -> CampusBayResult<bool>;

    /// Atomically bumps the view counter. Returns false if the item is gone.
    async fn increment_views(&self, id: ItemId) -> CampusBayResult<bool>;

    /// Marks an item deleted. Returns false if it was already gone.
    async fn soft_delete(&self, id: ItemId) -> CampusBayResult<bool>;

    /// Counts visible items.
    async fn count(&self) -> CampusBayResult<u64>;
}

/// Message repository trait.
#[async_trait]
pub trait MessageRepository: Interface + Send + Sync {
    /// Finds a message by ID.
    async fn find_by_id(&self, id: MessageId) -> CampusBayResult<Option<Message>>;

    /// Saves a new message.
    async fn save(&self, message: &Message) -> CampusBayResult<Message>;

    /// The latest `limit` messages sent or received by a user, newest first.
    async fn recent_for_user(&self, user_id: UserId, limit: u32) -> CampusBayResult<Vec<Message>>;

    /// Every message exchanged between two users, oldest first.
    async fn thread(&self, user_id: UserId, other_id: UserId) -> CampusBayResult<Vec<Message>>;

    /// Marks one message read.
    async fn mark_read(&self, id: MessageId) -> CampusBayResult<bool>;

    /// Marks every unread message from `sender_id` to `recipient_id` read.
    /// Returns how many changed.
    async fn mark_thread_read(&self, recipient_id: UserId, sender_id: UserId) -> CampusBayResult<u64>;

    /// Number of unread messages addressed to a user.
    async fn unread_count(&self, user_id: UserId) -> CampusBayResult<u64>;
}

/// Wishlist repository trait.
#[async_trait]
pub trait WishlistRepository: Interface + Send + Sync {
    /// Returns the user's wishlist, creating an empty one on first access.
    async fn get_or_create(&self, user_id: UserId) -> CampusBayResult<Wishlist>;

    /// Returns the user's wishlist if one exists. Never creates.
    async fn find_by_user(&self, user_id: UserId) -> CampusBayResult<Option<Wishlist>>;

    /// Adds an item. Returns false if it was already present.
    async fn add_item(&self, user_id: UserId, item_id: ItemId) -> CampusBayResult<bool>;

    /// Removes an item. Returns false if it was not present. Never creates a wishlist.
    async fn remove_item(&self, user_id: UserId, item_id: ItemId) -> CampusBayResult<bool>;

    /// Checks whether the user's wishlist holds an item.
    async fn contains(&self, user_id: UserId, item_id: ItemId) -> CampusBayResult<bool>;
}

/// Row counts removed by [`MaintenanceRepository::clear_all`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClearReport {
    pub messages: u64,
    pub wishlists: u64,
    pub items: u64,
    pub users: u64,
}

/// Administrative data maintenance.
#[async_trait]
pub trait MaintenanceRepository: Interface + Send + Sync {
    /// Deletes every row in dependency order, in one transaction.
    async fn clear_all(&self) -> CampusBayResult<ClearReport>;
}
