//! Application configuration structures.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Application name and metadata.
    #[serde(default)]
    pub app: AppMetadata,

    /// HTTP server configuration.
    #[serde(default)]
    pub server: ServerConfig,

    /// Database configuration.
    #[serde(default)]
    pub database: DatabaseConfig,

    /// JWT/Security configuration.
    #[serde(default)]
    pub security: SecurityConfig,

    /// Marketplace rules.
    #[serde(default)]
    pub marketplace: MarketplaceConfig,

    /// Cache configuration.
    #[serde(default)]
    pub cache: CacheConfig,

    /// Observability configuration.
    #[serde(default)]
    pub observability: ObservabilityConfig,
}

/// Application metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppMetadata {
    /// Application name.
    pub name: String,
    /// Application version.
    pub version: String,
    /// Environment (development, staging, production).
    pub environment: String,
}

impl Default for AppMetadata {
    fn default() -> Self {
        Self {
            name: "campusbay".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment: "development".to_string(),
        }
    }
}

impl AppMetadata {
    #[must_use]
    pub fn is_production(&self) -> bool {
        self.environment.eq_ignore_ascii_case("production")
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Bind host.
    pub host: String,
    /// Bind port.
    pub port: u16,
    /// Request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Maximum request body size in bytes.
    pub max_body_size: usize,
    /// Enable CORS.
    pub cors_enabled: bool,
    /// CORS allowed origins; `*` allows any origin.
    pub cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 4000,
            request_timeout_secs: 30,
            max_body_size: 1024 * 1024,
            cors_enabled: true,
            cors_origins: vec!["*".to_string()],
        }
    }
}

impl ServerConfig {
    /// Returns the bind address.
    #[must_use]
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Returns the request timeout as a Duration.
    #[must_use]
    pub const fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Returns true when every origin is allowed.
    #[must_use]
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.iter().any(|o| o == "*")
    }
}

/// Database configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    /// SQLite database URL, e.g. `sqlite://campusbay.db` or `sqlite::memory:`.
    pub url: String,
    /// Minimum connection pool size.
    pub min_connections: u32,
    /// Maximum connection pool size.
    pub max_connections: u32,
    /// Connection acquire timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Idle timeout in seconds.
    pub idle_timeout_secs: u64,
    /// Busy timeout for lock contention in seconds.
    pub busy_timeout_secs: u64,
    /// Run pending migrations on startup.
    pub run_migrations: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://campusbay.db".to_string(),
            min_connections: 1,
            max_connections: 10,
            connect_timeout_secs: 30,
            idle_timeout_secs: 600,
            busy_timeout_secs: 30,
            run_migrations: true,
        }
    }
}

impl DatabaseConfig {
    /// Config for a private in-memory database, used by tests.
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            url: "sqlite::memory:".to_string(),
            min_connections: 1,
            max_connections: 1,
            ..Self::default()
        }
    }

    /// Returns the connect timeout as a Duration.
    #[must_use]
    pub const fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    /// Returns the idle timeout as a Duration.
    #[must_use]
    pub const fn idle_timeout(&self) -> Duration {
        Duration::from_secs(self.idle_timeout_secs)
    }

    /// Returns the busy timeout as a Duration.
    #[must_use]
    pub const fn busy_timeout(&self) -> Duration {
        Duration::from_secs(self.busy_timeout_secs)
    }
}

/// Security configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// JWT secret key.
    pub jwt_secret: String,
    /// JWT access token expiration in seconds.
    pub jwt_access_expiration_secs: u64,
    /// JWT refresh token expiration in seconds.
    pub jwt_refresh_expiration_secs: u64,
    /// JWT issuer.
    pub jwt_issuer: String,
    /// JWT audience.
    pub jwt_audience: String,
    /// Argon2 memory cost in MiB.
    pub password_hash_cost: u32,
}

/// Placeholder secret that must be replaced outside development.
pub const DEFAULT_JWT_SECRET: &str = "change-me-in-production";

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            jwt_secret: DEFAULT_JWT_SECRET.to_string(),
            jwt_access_expiration_secs: 7 * 24 * 60 * 60,
            jwt_refresh_expiration_secs: 30 * 24 * 60 * 60,
            jwt_issuer: "campusbay".to_string(),
            jwt_audience: "campusbay-api".to_string(),
            password_hash_cost: 19,
        }
    }
}

impl SecurityConfig {
    /// Returns the access token expiration as a Duration.
    #[must_use]
    pub const fn access_token_expiration(&self) -> Duration {
        Duration::from_secs(self.jwt_access_expiration_secs)
    }

    /// Returns the refresh token expiration as a Duration.
    #[must_use]
    pub const fn refresh_token_expiration(&self) -> Duration {
        Duration::from_secs(self.jwt_refresh_expiration_secs)
    }
}

/// Marketplace rules.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MarketplaceConfig {
    /// Users registering with `@<domain>` addresses are marked verified.
    pub allowed_college_domain: String,
    /// Number of recent messages returned by the conversations view.
    pub conversation_limit: u32,
    /// Page size used when a listing search does not specify one.
    pub default_page_size: u32,
}

impl Default for MarketplaceConfig {
    fn default() -> Self {
        Self {
            allowed_college_domain: "college.edu".to_string(),
            conversation_limit: 200,
            default_page_size: 50,
        }
    }
}

/// Cache backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum CacheBackend {
    /// Process-local cache.
    #[default]
    Memory,
    /// Shared Redis cache.
    Redis,
    /// No caching.
    Disabled,
}

/// Cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Backend to use.
    pub backend: CacheBackend,
    /// Redis URL when the Redis backend is selected.
    pub redis_url: String,
    /// Redis connection pool size.
    pub redis_pool_size: usize,
    /// TTL for cached user summaries, in seconds.
    pub ttl_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            backend: CacheBackend::Memory,
            redis_url: "redis://localhost:6379".to_string(),
            redis_pool_size: 8,
            ttl_secs: 300,
        }
    }
}

impl CacheConfig {
    /// Returns the TTL as a Duration.
    #[must_use]
    pub const fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default filter directive when `RUST_LOG` is unset.
    pub log_level: String,
    /// Log format (json, pretty).
    pub log_format: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info,campusbay=debug,tower_http=debug".to_string(),
            log_format: "pretty".to_string(),
        }
    }
}

impl ObservabilityConfig {
    #[must_use]
    pub fn is_json(&self) -> bool {
        self.log_format.eq_ignore_ascii_case("json")
    }
}
