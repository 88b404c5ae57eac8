//! SQLite message repository implementation.

use super::parse_column;
use crate::{traits::MessageRepository, DatabasePoolInterface};
use async_trait::async_trait;
use campusbay_core::{CampusBayError, CampusBayResult, MessageId, UserId};
use campusbay_domain::Message;
use chrono::{DateTime, Utc};
use shaku::Component;
use sqlx::FromRow;
use std::sync::Arc;
use tracing::debug;

const MESSAGE_COLUMNS: &str = "id, sender_id, recipient_id, item_id, text, read, created_at";

/// SQLite message repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = MessageRepository)]
pub struct SqliteMessageRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl SqliteMessageRepository {
    /// Creates a new SQLite message repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct MessageRow {
    id: String,
    sender_id: String,
    recipient_id: String,
    item_id: Option<String>,
    text: String,
    read: bool,
    created_at: DateTime<Utc>,
}

impl TryFrom<MessageRow> for Message {
    type Error = CampusBayError;

    fn try_from(row: MessageRow) -> Result<Self, Self::Error> {
        Ok(Message {
            id: parse_column(&row.id, "messages.id")?,
            sender_id: parse_column(&row.sender_id, "messages.sender_id")?,
            recipient_id: parse_column(&row.recipient_id, "messages.recipient_id")?,
            item_id: row
                .item_id
                .as_deref()
                .map(|id| parse_column(id, "messages.item_id"))
                .transpose()?,
            text: row.text,
            read: row.read,
            created_at: row.created_at,
        })
    }
}

#[async_trait]
impl MessageRepository for SqliteMessageRepository {
    async fn find_by_id(&self, id: MessageId) -> CampusBayResult<Option<Message>> {
        let row = sqlx::query_as::<_, MessageRow>(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages WHERE id = ?"
        ))
        .bind(id.to_string())
        .fetch_optional(self.pool.inner())
        .await?;

        row.map(Message::try_from).transpose()
    }

    async fn save(&self, message: &Message) -> CampusBayResult<Message> {
        debug!("Saving message {} from {}", message.id, message.sender_id);

        sqlx::query(
            r"
            INSERT INTO messages (id, sender_id, recipient_id, item_id, text, read, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(message.id.to_string())
        .bind(message.sender_id.to_string())
        .bind(message.recipient_id.to_string())
        .bind(message.item_id.map(|id| id.to_string()))
        .bind(&message.text)
        .bind(message.read)
        .bind(message.created_at)
        .execute(self.pool.inner())
        .await?;

        Ok(message.clone())
    }

    async fn recent_for_user(&self, user_id: UserId, limit: u32) -> CampusBayResult<Vec<Message>> {
        let rows = sqlx::query_as::<_, MessageRow>(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages \
             WHERE sender_id = ?1 OR recipient_id = ?1 \
             ORDER BY created_at DESC, id DESC LIMIT ?2"
        ))
        .bind(user_id.to_string())
        .bind(i64::from(limit))
        .fetch_all(self.pool.inner())
        .await?;

        rows.into_iter().map(Message::try_from).collect()
    }

    async fn thread(&self, user_id: UserId, other_id: UserId) -> CampusBayResult<Vec<Message>> {
        let rows = sqlx::query_as::<_, MessageRow>(&format!(
            "SELECT {MESSAGE_COLUMNS} FROM messages \
             WHERE (sender_id = ?1 AND recipient_id = ?2) OR (sender_id = ?2 AND recipient_id = ?1) \
             ORDER BY created_at ASC, id ASC"
        ))
        .bind(user_id.to_string())
        .bind(other_id.to_string())
        .fetch_all(self.pool.inner())
        .await?;

        rows.into_iter().map(Message::try_from).collect()
    }

    async fn mark_read(&self, id: MessageId) -> CampusBayResult<bool> {
        let result = sqlx::query("UPDATE messages SET read = 1 WHERE id = ?")
            .bind(id.to_string())
            .execute(self.pool.inner())
            .await?;
        Ok(result.rows_affected() == 1)
    }

    async fn mark_thread_read(
        &self,
        recipient_id: UserId,
        sender_id: UserId,
    ) -> CampusBayResult<u64> {
        let result = sqlx::query(
            "UPDATE messages SET read = 1 WHERE recipient_id = ? AND sender_id = ? AND read = 0",
        )
        .bind(recipient_id.to_string())
        .bind(sender_id.to_string())
        .execute(self.pool.inner())
        .await?;
        Ok(result.rows_affected())
    }

    async fn unread_count(&self, user_id: UserId) -> CampusBayResult<u64> {
        let total: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM messages WHERE recipient_id = ? AND read = 0")
                .bind(user_id.to_string())
                .fetch_one(self.pool.inner())
                .await?;
        Ok(u64::try_from(total).unwrap_or_default())
    }
}
