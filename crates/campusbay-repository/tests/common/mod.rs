//! Common test infrastructure for database integration tests.

#![allow(dead_code)]

use campusbay_domain::{Category, Email, Item, NewItem, User};
use campusbay_repository::{
    DatabasePool, DatabasePoolInterface, ItemRepository, SqliteItemRepository,
    SqliteMaintenanceRepository, SqliteMessageRepository, SqliteUserRepository,
    SqliteWishlistRepository, UserRepository,
};
use std::sync::Arc;

/// A private, migrated in-memory database with every repository wired to it.
pub struct TestDatabase {
    pub pool: Arc<dyn DatabasePoolInterface>,
    pub users: SqliteUserRepository,
    pub items: SqliteItemRepository,
    pub messages: SqliteMessageRepository,
    pub wishlists: SqliteWishlistRepository,
    pub maintenance: SqliteMaintenanceRepository,
}

impl TestDatabase {
    pub async fn new() -> Self {
        let pool: Arc<dyn DatabasePoolInterface> = Arc::new(
            DatabasePool::connect_in_memory()
                .await
                .expect("Failed to open in-memory database"),
        );

        Self {
            users: SqliteUserRepository::new(pool.clone()),
            items: SqliteItemRepository::new(pool.clone()),
            messages: SqliteMessageRepository::new(pool.clone()),
            wishlists: SqliteWishlistRepository::new(pool.clone()),
            maintenance: SqliteMaintenanceRepository::new(pool.clone()),
            pool,
        }
    }

    /// Registers and stores a user.
    pub async fn user(&self, name: &str, email: &str) -> User {
        let user = User::register(
            name.to_string(),
            Email::new(email).expect("valid email"),
            "hashed_password".to_string(),
            Some("BMS College".to_string()),
            "college.edu",
        );
        self.users.save(&user).await.expect("Failed to save user")
    }

    /// Lists and stores an item.
    pub async fn item(&self, seller: &User, title: &str, price: f64, category: Category) -> Item {
        let item = Item::list(
            seller.id,
            NewItem {
                title: title.to_string(),
                description: format!("{title} in good condition"),
                price,
                category,
                location: None,
                images: Vec::new(),
            },
        );
        self.items.save(&item).await.expect("Failed to save item")
    }
}
