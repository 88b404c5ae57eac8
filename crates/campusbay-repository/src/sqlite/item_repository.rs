//! SQLite item repository implementation.

use super::parse_column;
use crate::{
    traits::{ItemQuery, ItemRepository},
    DatabasePoolInterface,
};
use async_trait::async_trait;
use campusbay_core::{CampusBayError, CampusBayResult, ItemId, Page, PageRequest, UserId};
use campusbay_domain::{Item, ListingSort, StatusChange, StoredItem};
use chrono::{DateTime, Utc};
use shaku::Component;
use sqlx::types::Json;
use sqlx::{FromRow, QueryBuilder, Sqlite};
use std::sync::Arc;
use tracing::{debug, info};

const ITEM_COLUMNS: &str = "id, seller_id, title, description, price, category, location, images, \
     availability_status, view_count, deleted_at, created_at, updated_at";

/// SQLite item repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = ItemRepository)]
pub struct SqliteItemRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl SqliteItemRepository {
    /// Creates a new SQLite item repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }

    async fn count_where(&self, query: &ItemQuery) -> CampusBayResult<u64> {
        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new("SELECT COUNT(*) FROM items");
        push_filters(&mut builder, query);
        let total: i64 = builder
            .build_query_scalar()
            .fetch_one(self.pool.inner())
            .await?;
        Ok(u64::try_from(total).unwrap_or_default())
    }
}

/// Database row representation of an item.
#[derive(Debug, FromRow)]
struct ItemRow {
    id: String,
    seller_id: String,
    title: String,
    description: String,
    price: f64,
    category: String,
    location: String,
    images: Json<Vec<String>>,
    availability_status: String,
    view_count: i64,
    deleted_at: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ItemRow> for Item {
    type Error = CampusBayError;

    fn try_from(row: ItemRow) -> Result<Self, Self::Error> {
        Ok(Item::restore(StoredItem {
            id: parse_column(&row.id, "items.id")?,
            seller_id: parse_column(&row.seller_id, "items.seller_id")?,
            title: row.title,
            description: row.description,
            price: row.price,
            category: parse_column(&row.category, "items.category")?,
            location: row.location,
            images: row.images.0,
            availability_status: parse_column(&row.availability_status, "items.availability_status")?,
            view_count: row.view_count,
            deleted_at: row.deleted_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }))
    }
}

/// Lowercased title and description, matched by text search.
fn search_document(item: &Item) -> String {
    format!("{}\n{}", item.title, item.description).to_lowercase()
}

/// Escapes `LIKE` wildcards so user text matches literally.
fn like_pattern(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + 2);
    escaped.push('%');
    for c in text.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped.push('%');
    escaped
}

fn push_filters(builder: &mut QueryBuilder<'_, Sqlite>, query: &ItemQuery) {
    builder.push(" WHERE deleted_at IS NULL");

    if let Some(status) = query.status.status() {
        builder.push(" AND availability_status = ").push_bind(status.as_str());
    }

    if let Some(category) = query.category {
        builder.push(" AND category = ").push_bind(category.as_str());
    }

    if let Some(text) = query.text.as_deref().map(str::trim).filter(|t| !t.is_empty()) {
        builder
            .push(" AND search_text LIKE ")
            .push_bind(like_pattern(&text.to_lowercase()))
            .push(" ESCAPE '\\'");
    }
}

const fn order_by(sort: ListingSort) -> &'static str {
    match sort {
        ListingSort::Newest => " ORDER BY created_at DESC, id DESC",
        ListingSort::Oldest => " ORDER BY created_at ASC, id ASC",
        ListingSort::PriceLow => " ORDER BY price ASC, created_at DESC",
        ListingSort::PriceHigh => " ORDER BY price DESC, created_at DESC",
        ListingSort::Popular => " ORDER BY view_count DESC, created_at DESC",
    }
}

#[async_trait]
impl ItemRepository for SqliteItemRepository {
    async fn find_by_id(&self, id: ItemId) -> CampusBayResult<Option<Item>> {
        debug!("Finding item by id: {}", id);

        let row = sqlx::query_as::<_, ItemRow>(&format!(
            "SELECT {ITEM_COLUMNS} FROM items WHERE id = ? AND deleted_at IS NULL"
        ))
        .bind(id.to_string())
        .fetch_optional(self.pool.inner())
        .await?;

        row.map(Item::try_from).transpose()
    }

    async fn find_by_ids(&self, ids: &[ItemId]) -> CampusBayResult<Vec<Item>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<Sqlite> = QueryBuilder::new(format!(
            "SELECT {ITEM_COLUMNS} FROM items WHERE deleted_at IS NULL AND id IN ("
        ));
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(id.to_string());
        }
        separated.push_unseparated(")");

        let rows = builder
            .build_query_as::<ItemRow>()
            .fetch_all(self.pool.inner())
            .await?;

        rows.into_iter().map(Item::try_from).collect()
    }

    async fn search(&self, query: &ItemQuery, page: PageRequest) -> CampusBayResult<Page<Item>> {
        debug!(
            "Searching items: {:?}, page: {}, limit: {}",
            query, page.page, page.limit
        );

        let total = self.count_where(query).await?;

        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {ITEM_COLUMNS} FROM items"));
        push_filters(&mut builder, query);
        builder
            .push(order_by(query.sort))
            .push(" LIMIT ")
            .push_bind(page.limit())
            .push(" OFFSET ")
            .push_bind(page.offset());

        let rows = builder
            .build_query_as::<ItemRow>()
            .fetch_all(self.pool.inner())
            .await?;

        let items = rows
            .into_iter()
            .map(Item::try_from)
            .collect::<CampusBayResult<Vec<_>>>()?;

        Ok(Page::new(items, page, total))
    }

    async fn find_by_seller(
        &self,
        seller_id: UserId,
        page: PageRequest,
    ) -> CampusBayResult<Page<Item>> {
        debug!("Finding items for seller: {}", seller_id);

        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM items WHERE seller_id = ? AND deleted_at IS NULL",
        )
        .bind(seller_id.to_string())
        .fetch_one(self.pool.inner())
        .await?;

        let rows = sqlx::query_as::<_, ItemRow>(&format!(
            "SELECT {ITEM_COLUMNS} FROM items WHERE seller_id = ? AND deleted_at IS NULL \
             ORDER BY created_at DESC, id DESC LIMIT ? OFFSET ?"
        ))
        .bind(seller_id.to_string())
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(self.pool.inner())
        .await?;

        let items = rows
            .into_iter()
            .map(Item::try_from)
            .collect::<CampusBayResult<Vec<_>>>()?;

        Ok(Page::new(items, page, u64::try_from(total).unwrap_or_default()))
    }

    async fn save(&self, item: &Item) -> CampusBayResult<Item> {
        debug!("Saving item: {}", item.id);

        let status = item.availability_status();
        sqlx::query(
            r"
            INSERT INTO items (id, seller_id, title, description, search_text, price, category, location,
                               images, availability_status, is_available, view_count, deleted_at,
                               created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(item.id.to_string())
        .bind(item.seller_id.to_string())
        .bind(&item.title)
        .bind(&item.description)
        .bind(search_document(item))
        .bind(item.price)
        .bind(item.category.as_str())
        .bind(&item.location)
        .bind(Json(&item.images))
        .bind(status.as_str())
        .bind(status.is_available())
        .bind(item.view_count)
        .bind(item.deleted_at)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(self.pool.inner())
        .await?;

        Ok(item.clone())
    }

    async fn update(&self, item: &Item) -> CampusBayResult<bool> {
        debug!("Updating item: {}", item.id);

        let result = sqlx::query(
            r"
            UPDATE items
            SET title = ?, description = ?, search_text = ?, price = ?, category = ?, location = ?,
                images = ?, updated_at = ?
            WHERE id = ? AND deleted_at IS NULL
            ",
        )
        .bind(&item.title)
        .bind(&item.description)
        .bind(search_document(item))
        .bind(item.price)
        .bind(item.category.as_str())
        .bind(&item.location)
        .bind(Json(&item.images))
        .bind(item.updated_at)
        .bind(item.id.to_string())
        .execute(self.pool.inner())
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn transition_status(&self, id: ItemId, change: StatusChange) -> CampusBayResult<bool> {
        let result = sqlx::query(
            r"
            UPDATE items
            SET availability_status = ?, is_available = ?, updated_at = ?
            WHERE id = ? AND availability_status = ? AND deleted_at IS NULL
            ",
        )
        .bind(change.to.as_str())
        .bind(change.to.is_available())
        .bind(Utc::now())
        .bind(id.to_string())
        .bind(change.from.as_str())
        .execute(self.pool.inner())
        .await?;

        let applied = result.rows_affected() == 1;
        if applied {
            info!("Item {} moved {} -> {}", id, change.from, change.to);
        } else {
            debug!("Item {} status changed concurrently; {} not applied", id, change.to);
        }
        Ok(applied)
    }

    async fn increment_views(&self, id: ItemId) -> CampusBayResult<bool> {
        let result = sqlx::query(
            "UPDATE items SET view_count = view_count + 1 WHERE id = ? AND deleted_at IS NULL",
        )
        .bind(id.to_string())
        .execute(self.pool.inner())
        .await?;

        Ok(result.rows_affected() == 1)
    }

    async fn soft_delete(&self, id: ItemId) -> CampusBayResult<bool> {
        let now = Utc::now();
        let result = sqlx::query(
            "UPDATE items SET deleted_at = ?, updated_at = ? WHERE id = ? AND deleted_at IS NULL",
        )
        .bind(now)
        .bind(now)
        .bind(id.to_string())
        .execute(self.pool.inner())
        .await?;

        let deleted = result.rows_affected() == 1;
        if deleted {
            info!("Item {} soft-deleted", id);
        }
        Ok(deleted)
    }

    async fn count(&self) -> CampusBayResult<u64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM items WHERE deleted_at IS NULL")
            .fetch_one(self.pool.inner())
            .await?;
        Ok(u64::try_from(total).unwrap_or_default())
    }
}
