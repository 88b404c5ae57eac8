//! Database connection pool management.

use async_trait::async_trait;
use campusbay_config::DatabaseConfig;
use campusbay_core::{CampusBayError, CampusBayResult, HealthCheck, HealthStatus, Interface};
use shaku::Component;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Interface for database pool operations.
///
/// This trait abstracts database pool functionality for dependency injection.
#[async_trait]
pub trait DatabasePoolInterface: Interface + Send + Sync {
    /// Returns a reference to the underlying SQLite pool.
    fn inner(&self) -> &SqlitePool;

    /// Checks if the database connection is healthy.
    async fn health_check(&self) -> CampusBayResult<()>;

    /// Runs database migrations.
    async fn run_migrations(&self) -> CampusBayResult<()>;

    /// Closes the database pool.
    async fn close(&self);
}

/// Database pool wrapper.
#[derive(Component)]
#[shaku(interface = DatabasePoolInterface)]
pub struct DatabasePool {
    pool: SqlitePool,
}

impl DatabasePool {
    /// Creates a new database pool from configuration.
    ///
    /// The file is created if missing. Connections run in WAL mode with
    /// foreign keys enforced.
    pub async fn connect(config: &DatabaseConfig) -> CampusBayResult<Self> {
        info!("Connecting to SQLite database at {}", config.url);

        let options = SqliteConnectOptions::from_str(&config.url)
            .map_err(|e| CampusBayError::Configuration(format!("Invalid database URL: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .foreign_keys(true)
            .busy_timeout(config.busy_timeout())
            .pragma("synchronous", "NORMAL");

        let mut pool_options = SqlitePoolOptions::new()
            .min_connections(config.min_connections)
            .max_connections(config.max_connections)
            .acquire_timeout(config.connect_timeout());

        // An in-memory database lives only as long as its connection.
        pool_options = if is_in_memory(&config.url) {
            pool_options.idle_timeout(None).max_lifetime(None)
        } else {
            pool_options.idle_timeout(Some(config.idle_timeout()))
        };

        let pool = pool_options.connect_with(options).await.map_err(|e| {
            warn!("Failed to connect to database: {}", e);
            CampusBayError::Database(format!("Failed to connect: {e}"))
        })?;

        info!("SQLite connection pool established");
        let db = Self { pool };
        if config.run_migrations {
            db.migrate().await?;
        }
        Ok(db)
    }

    /// Opens a private, migrated in-memory database.
    pub async fn connect_in_memory() -> CampusBayResult<Self> {
        Self::connect(&DatabaseConfig::in_memory()).await
    }

    /// Creates a `DatabasePool` around an existing pool (for Shaku injection).
    #[must_use]
    pub fn with_pool(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn migrate(&self) -> CampusBayResult<()> {
        info!("Running database migrations...");
        sqlx::migrate!("../../migrations").run(&self.pool).await?;
        info!("Database migrations completed");
        Ok(())
    }
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

#[async_trait]
impl DatabasePoolInterface for DatabasePool {
    fn inner(&self) -> &SqlitePool {
        &self.pool
    }

    async fn health_check(&self) -> CampusBayResult<()> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| CampusBayError::Database(format!("Health check failed: {e}")))?;
        debug!("Database health check passed");
        Ok(())
    }

    async fn run_migrations(&self) -> CampusBayResult<()> {
        self.migrate().await
    }

    async fn close(&self) {
        info!("Closing database connection pool...");
        self.pool.close().await;
        info!("Database connection pool closed");
    }
}

#[async_trait]
impl HealthCheck for DatabasePool {
    fn name(&self) -> &str {
        "database"
    }

    async fn check(&self) -> HealthStatus {
        match DatabasePoolInterface::health_check(self).await {
            Ok(()) => HealthStatus::Healthy,
            Err(e) => HealthStatus::Unhealthy(e.to_string()),
        }
    }
}

impl std::fmt::Debug for DatabasePool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DatabasePool")
            .field("size", &self.pool.size())
            .field("num_idle", &self.pool.num_idle())
            .finish()
    }
}

/// Creates a shared database pool.
pub async fn create_pool(config: &DatabaseConfig) -> CampusBayResult<Arc<DatabasePool>> {
    let pool = DatabasePool::connect(config).await?;
    Ok(Arc::new(pool))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_memory_detection() {
        assert!(is_in_memory("sqlite::memory:"));
        assert!(is_in_memory("sqlite://file:test?mode=memory&cache=shared"));
        assert!(!is_in_memory("sqlite://campusbay.db"));
    }

    #[tokio::test]
    async fn test_connect_in_memory_is_healthy() {
        let db = DatabasePool::connect_in_memory().await.unwrap();
        assert!(db.check().await.is_healthy());
        assert_eq!(HealthCheck::name(&db), "database");
    }

    #[tokio::test]
    async fn test_migrations_are_idempotent() {
        let db = DatabasePool::connect_in_memory().await.unwrap();
        db.run_migrations().await.unwrap();

        let tables: Vec<String> = sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name NOT LIKE '\\_%' ESCAPE '\\' ORDER BY name",
        )
        .fetch_all(db.inner())
        .await
        .unwrap();
        assert_eq!(tables, vec!["items", "messages", "users", "wishlist_items", "wishlists"]);
    }

    #[tokio::test]
    async fn test_file_database_created() {
        let dir = tempfile::tempdir().unwrap();
        let config = DatabaseConfig {
            url: format!("sqlite://{}", dir.path().join("test.db").display()),
            ..DatabaseConfig::default()
        };
        let db = DatabasePool::connect(&config).await.unwrap();
        db.health_check().await.unwrap();
        db.close().await;
        assert!(dir.path().join("test.db").exists());
    }
}
