//! Bulk data maintenance.

use crate::{
    traits::{ClearReport, MaintenanceRepository},
    DatabasePoolInterface,
};
use async_trait::async_trait;
use campusbay_core::CampusBayResult;
use shaku::Component;
use std::sync::Arc;
use tracing::info;

/// SQLite implementation of [`MaintenanceRepository`].
#[derive(Component, Clone)]
#[shaku(interface = MaintenanceRepository)]
pub struct SqliteMaintenanceRepository {
    #[shaku(inject)]
    pool: Arc<dyn DatabasePoolInterface>,
}

impl SqliteMaintenanceRepository {
    #[must_use]
    pub fn new(pool: Arc<dyn DatabasePoolInterface>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MaintenanceRepository for SqliteMaintenanceRepository {
    async fn clear_all(&self) -> CampusBayResult<ClearReport> {
        let mut tx = self.pool.inner().begin().await?;

        let messages = sqlx::query("DELETE FROM messages").execute(&mut *tx).await?.rows_affected();
        sqlx::query("DELETE FROM wishlist_items").execute(&mut *tx).await?;
        let wishlists = sqlx::query("DELETE FROM wishlists").execute(&mut *tx).await?.rows_affected();
        let items = sqlx::query("DELETE FROM items").execute(&mut *tx).await?.rows_affected();
        let users = sqlx::query("DELETE FROM users").execute(&mut *tx).await?.rows_affected();

        tx.commit().await?;

        let report = ClearReport {
            messages,
            wishlists,
            items,
            users,
        };
        info!(?report, "Cleared all marketplace data");
        Ok(report)
    }
}
