//! SQLite wishlist repository implementation.

use super::parse_column;
use crate::{traits::WishlistRepository, DatabasePoolInterface};
use async_trait::async_trait;
use campusbay_core::{CampusBayResult, ItemId, UserId, WishlistId};
use campusbay_domain::Wishlist;
use chrono::{DateTime, Utc};
use shaku::Component;
use sqlx::{FromRow, SqliteConnection};
use std::sync::Arc;
use tracing::debug;

/// SQLite wishlist repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = WishlistRepository)]
pub struct SqliteWishlistRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl SqliteWishlistRepository {
    /// Creates a new SQLite wishlist repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct WishlistRow {
    id: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Creates the wishlist row if missing and returns it.
async fn ensure_wishlist(conn: &mut SqliteConnection, user_id: UserId) -> CampusBayResult<WishlistRow> {
    let now = Utc::now();
    sqlx::query(
        r"
        INSERT INTO wishlists (id, user_id, created_at, updated_at)
        VALUES (?, ?, ?, ?)
        ON CONFLICT(user_id) DO NOTHING
        ",
    )
    .bind(WishlistId::new().to_string())
    .bind(user_id.to_string())
    .bind(now)
    .bind(now)
    .execute(&mut *conn)
    .await?;

    let row = sqlx::query_as::<_, WishlistRow>(
        "SELECT id, created_at, updated_at FROM wishlists WHERE user_id = ?",
    )
    .bind(user_id.to_string())
    .fetch_one(&mut *conn)
    .await?;
    Ok(row)
}

async fn hydrate(
    conn: &mut SqliteConnection,
    user_id: UserId,
    row: WishlistRow,
) -> CampusBayResult<Wishlist> {
    let item_ids: Vec<String> = sqlx::query_scalar(
        "SELECT item_id FROM wishlist_items WHERE wishlist_id = ? ORDER BY added_at ASC, rowid ASC",
    )
    .bind(&row.id)
    .fetch_all(&mut *conn)
    .await?;

    Ok(Wishlist {
        id: parse_column(&row.id, "wishlists.id")?,
        user_id,
        items: item_ids
            .iter()
            .map(|id| parse_column(id, "wishlist_items.item_id"))
            .collect::<CampusBayResult<Vec<ItemId>>>()?,
        created_at: row.created_at,
        updated_at: row.updated_at,
    })
}

#[async_trait]
impl WishlistRepository for SqliteWishlistRepository {
    async fn get_or_create(&self, user_id: UserId) -> CampusBayResult<Wishlist> {
        debug!("Loading wishlist for user: {}", user_id);

        let mut conn = self.pool.inner().acquire().await?;
        let row = ensure_wishlist(&mut conn, user_id).await?;
        hydrate(&mut conn, user_id, row).await
    }

    async fn find_by_user(&self, user_id: UserId) -> CampusBayResult<Option<Wishlist>> {
        let mut conn = self.pool.inner().acquire().await?;
        let row = sqlx::query_as::<_, WishlistRow>(
            "SELECT id, created_at, updated_at FROM wishlists WHERE user_id = ?",
        )
        .bind(user_id.to_string())
        .fetch_optional(&mut *conn)
        .await?;

        match row {
            Some(row) => hydrate(&mut conn, user_id, row).await.map(Some),
            None => Ok(None),
        }
    }

    async fn add_item(&self, user_id: UserId, item_id: ItemId) -> CampusBayResult<bool> {
        let mut tx = self.pool.inner().begin().await?;
        let wishlist = ensure_wishlist(&mut tx, user_id).await?;
        let now = Utc::now();

        let inserted = sqlx::query(
            "INSERT OR IGNORE INTO wishlist_items (wishlist_id, item_id, added_at) VALUES (?, ?, ?)",
        )
        .bind(&wishlist.id)
        .bind(item_id.to_string())
        .bind(now)
        .execute(&mut *tx)
        .await?
        .rows_affected()
            == 1;

        if inserted {
            sqlx::query("UPDATE wishlists SET updated_at = ? WHERE id = ?")
                .bind(now)
                .bind(&wishlist.id)
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;

        debug!("Wishlist add {} for {}: inserted={}", item_id, user_id, inserted);
        Ok(inserted)
    }

    async fn remove_item(&self, user_id: UserId, item_id: ItemId) -> CampusBayResult<bool> {
        let mut tx = self.pool.inner().begin().await?;

        let removed = sqlx::query(
            r"
            DELETE FROM wishlist_items
            WHERE item_id = ?1
              AND wishlist_id = (SELECT id FROM wishlists WHERE user_id = ?2)
            ",
        )
        .bind(item_id.to_string())
        .bind(user_id.to_string())
        .execute(&mut *tx)
        .await?
        .rows_affected()
            == 1;

        if removed {
            sqlx::query("UPDATE wishlists SET updated_at = ? WHERE user_id = ?")
                .bind(Utc::now())
                .bind(user_id.to_string())
                .execute(&mut *tx)
                .await?;
        }
        tx.commit().await?;

        Ok(removed)
    }

    async fn contains(&self, user_id: UserId, item_id: ItemId) -> CampusBayResult<bool> {
        let found: Option<i32> = sqlx::query_scalar(
            r"
            SELECT 1 FROM wishlist_items wi
            JOIN wishlists w ON w.id = wi.wishlist_id
            WHERE w.user_id = ? AND wi.item_id = ?
            LIMIT 1
            ",
        )
        .bind(user_id.to_string())
        .bind(item_id.to_string())
        .fetch_optional(self.pool.inner())
        .await?;

        Ok(found.is_some())
    }
}
