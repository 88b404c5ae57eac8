//! SQLite user repository implementation.

use super::parse_column;
use crate::{traits::UserRepository, DatabasePoolInterface};
use async_trait::async_trait;
use campusbay_core::{CampusBayError, CampusBayResult, UserId};
use campusbay_domain::{Email, User};
use chrono::{DateTime, Utc};
use shaku::Component;
use sqlx::{FromRow, QueryBuilder, Sqlite};
use std::sync::Arc;
use tracing::debug;

const USER_COLUMNS: &str =
    "id, name, email, password_hash, college, verified, created_at, updated_at";

/// SQLite user repository implementation.
#[derive(Component, Clone)]
#[shaku(interface = UserRepository)]
pub struct SqliteUserRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl SqliteUserRepository {
    /// Creates a new SQLite user repository.
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

/// Database row representation of a user.
#[derive(Debug, FromRow)]
struct UserRow {
    id: String,
    name: String,
    email: String,
    password_hash: String,
    college: Option<String>,
    verified: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = CampusBayError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(User {
            id: parse_column(&row.id, "users.id")?,
            name: row.name,
            email: Email::new_unchecked(row.email),
            password_hash: row.password_hash,
            college: row.college,
            verified: row.verified,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

#[async_trait]
impl UserRepository for SqliteUserRepository {
    async fn find_by_id(&self, id: UserId) -> CampusBayResult<Option<User>> {
        debug!("Finding user by id: {}", id);

        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = ?"
        ))
        .bind(id.to_string())
        .fetch_optional(self.pool.inner())
        .await?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_email(&self, email: &Email) -> CampusBayResult<Option<User>> {
        debug!("Finding user by email: {}", email.as_str());

        let row = sqlx::query_as::<_, UserRow>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE email = ?"
        ))
        .bind(email.as_str())
        .fetch_optional(self.pool.inner())
        .await?;

        row.map(User::try_from).transpose()
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> CampusBayResult<Vec<User>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut builder: QueryBuilder<Sqlite> =
            QueryBuilder::new(format!("SELECT {USER_COLUMNS} FROM users WHERE id IN ("));
        let mut separated = builder.separated(", ");
        for id in ids {
            separated.push_bind(id.to_string());
        }
        separated.push_unseparated(")");

        let rows = builder
            .build_query_as::<UserRow>()
            .fetch_all(self.pool.inner())
            .await?;

        rows.into_iter().map(User::try_from).collect()
    }

    async fn exists_by_email(&self, email: &Email) -> CampusBayResult<bool> {
        let result: Option<i32> = sqlx::query_scalar("SELECT 1 FROM users WHERE email = ? LIMIT 1")
            .bind(email.as_str())
            .fetch_optional(self.pool.inner())
            .await?;

        Ok(result.is_some())
    }

    async fn save(&self, user: &User) -> CampusBayResult<User> {
        debug!("Saving user: {}", user.id);

        sqlx::query(
            r"
            INSERT INTO users (id, name, email, password_hash, college, verified, created_at, updated_at)
            VALUES (?, ?, ?, ?, ?, ?, ?, ?)
            ",
        )
        .bind(user.id.to_string())
        .bind(&user.name)
        .bind(user.email.as_str())
        .bind(&user.password_hash)
        .bind(&user.college)
        .bind(user.verified)
        .bind(user.created_at)
        .bind(user.updated_at)
        .execute(self.pool.inner())
        .await
        .map_err(|e| match CampusBayError::from(e) {
            CampusBayError::Conflict(_) => CampusBayError::conflict("Email already registered"),
            other => other,
        })?;

        Ok(user.clone())
    }

    async fn count(&self) -> CampusBayResult<u64> {
        let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(self.pool.inner())
            .await?;
        Ok(u64::try_from(total).unwrap_or_default())
    }
}
