//! Configuration loader with layered sources.

use crate::{AppConfig, CacheBackend, DEFAULT_JWT_SECRET};
use campusbay_core::CampusBayError;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

/// Plain environment variables honoured for compatibility with existing
/// deployments, mapped onto their configuration keys.
const LEGACY_ENV_KEYS: &[(&str, &str)] = &[
    ("PORT", "server.port"),
    ("DATABASE_URL", "database.url"),
    ("JWT_SECRET", "security.jwt_secret"),
    ("ALLOWED_COLLEGE_DOMAIN", "marketplace.allowed_college_domain"),
    ("REDIS_URL", "cache.redis_url"),
];

/// Configuration loader with runtime refresh support.
#[derive(Clone)]
pub struct ConfigLoader {
    config: Arc<RwLock<AppConfig>>,
    config_dir: PathBuf,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    ///
    /// Configuration is loaded from multiple sources in order:
    /// 1. `config/default.toml` - Default values
    /// 2. `config/{environment}.toml` - Environment-specific overrides
    /// 3. `config/local.toml` - Uncommitted local overrides
    /// 4. Legacy variables (`PORT`, `JWT_SECRET`, `FRONTEND_ORIGIN`, ...)
    /// 5. Environment variables with `CAMPUSBAY__` prefix
    pub fn new(config_dir: impl Into<PathBuf>) -> Result<Self, CampusBayError> {
        let config_dir = config_dir.into();
        let config = Self::load_config(&config_dir)?;

        Ok(Self {
            config: Arc::new(RwLock::new(config)),
            config_dir,
        })
    }

    /// Loads configuration from the default location (`./config`).
    pub fn from_default_location() -> Result<Self, CampusBayError> {
        Self::new("./config")
    }

    /// Returns the current configuration.
    pub async fn get(&self) -> AppConfig {
        self.config.read().await.clone()
    }

    /// Reloads the configuration from disk.
    pub async fn reload(&self) -> Result<(), CampusBayError> {
        let new_config = Self::load_config(&self.config_dir)?;
        let mut config = self.config.write().await;
        *config = new_config;
        info!("Configuration reloaded successfully");
        Ok(())
    }

    fn load_config(config_dir: &Path) -> Result<AppConfig, CampusBayError> {
        if let Err(e) = dotenvy::dotenv() {
            debug!("No .env file loaded: {}", e);
        }

        let environment =
            std::env::var("CAMPUSBAY_ENV").unwrap_or_else(|_| "development".to_string());
        info!("Loading configuration for environment: {}", environment);

        let mut builder = Config::builder()
            .set_default("app.environment", environment.clone())
            .map_err(config_error)?;

        for name in ["default", environment.as_str(), "local"] {
            let path = config_dir.join(format!("{name}.toml"));
            if path.exists() {
                debug!("Loading config file: {}", path.display());
                builder = builder.add_source(File::from(path).required(false));
            }
        }

        builder = apply_legacy_env(builder, |key| std::env::var(key).ok())?;

        builder = builder.add_source(
            Environment::with_prefix("CAMPUSBAY")
                .prefix_separator("__")
                .separator("__")
                .list_separator(",")
                .with_list_parse_key("server.cors_origins")
                .try_parsing(true),
        );

        let app_config: AppConfig = builder
            .build()
            .and_then(Config::try_deserialize)
            .map_err(config_error)?;

        validate_config(&app_config)?;

        Ok(app_config)
    }
}

/// Maps legacy plain variables onto configuration overrides.
fn apply_legacy_env<F>(
    mut builder: ConfigBuilder<DefaultState>,
    lookup: F,
) -> Result<ConfigBuilder<DefaultState>, CampusBayError>
where
    F: Fn(&str) -> Option<String>,
{
    for (var, key) in LEGACY_ENV_KEYS {
        builder = builder
            .set_override_option(*key, lookup(var))
            .map_err(config_error)?;
    }
    if let Some(origin) = lookup("FRONTEND_ORIGIN") {
        builder = builder
            .set_override("server.cors_origins", vec![origin])
            .map_err(config_error)?;
    }
    Ok(builder)
}

/// Validates the configuration.
pub fn validate_config(config: &AppConfig) -> Result<(), CampusBayError> {
    if config.security.jwt_secret == DEFAULT_JWT_SECRET {
        if config.app.is_production() {
            return Err(CampusBayError::Configuration(
                "security.jwt_secret must be set in production".to_string(),
            ));
        }
        warn!("Using the default JWT secret; set JWT_SECRET before deploying");
    }

    if config.security.jwt_secret.len() < 16 {
        return Err(CampusBayError::Configuration(
            "security.jwt_secret must be at least 16 characters".to_string(),
        ));
    }

    if config.database.url.is_empty() {
        return Err(CampusBayError::Configuration("Database URL is required".to_string()));
    }

    if config.database.max_connections == 0
        || config.database.min_connections > config.database.max_connections
    {
        return Err(CampusBayError::Configuration(
            "database.min_connections must not exceed a non-zero max_connections".to_string(),
        ));
    }

    if config.marketplace.allowed_college_domain.trim().is_empty() {
        return Err(CampusBayError::Configuration(
            "marketplace.allowed_college_domain is required".to_string(),
        ));
    }

    if config.cache.backend == CacheBackend::Redis && config.cache.redis_url.is_empty() {
        return Err(CampusBayError::Configuration(
            "cache.redis_url is required for the redis backend".to_string(),
        ));
    }

    Ok(())
}

fn config_error(err: ConfigError) -> CampusBayError {
    CampusBayError::Configuration(err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::fs;

    fn lookup_from(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_legacy_env_overrides() {
        let builder = apply_legacy_env(
            Config::builder(),
            lookup_from(&[
                ("PORT", "5050"),
                ("ALLOWED_COLLEGE_DOMAIN", "bmsce.ac.in"),
                ("FRONTEND_ORIGIN", "http://localhost:5173"),
            ]),
        )
        .unwrap();
        let config: AppConfig = builder.build().unwrap().try_deserialize().unwrap();
        assert_eq!(config.server.port, 5050);
        assert_eq!(config.marketplace.allowed_college_domain, "bmsce.ac.in");
        assert_eq!(config.server.cors_origins, vec!["http://localhost:5173".to_string()]);
        assert_eq!(config.database.url, "sqlite://campusbay.db");
    }

    #[test]
    fn test_validate_rejects_default_secret_in_production() {
        let mut config = AppConfig::default();
        config.app.environment = "production".to_string();
        assert!(validate_config(&config).is_err());

        config.security.jwt_secret = "a-long-enough-production-secret".to_string();
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_validate_rejects_short_secret() {
        let mut config = AppConfig::default();
        config.security.jwt_secret = "short".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_validate_pool_bounds() {
        let mut config = AppConfig::default();
        config.database.min_connections = 5;
        config.database.max_connections = 2;
        assert!(validate_config(&config).is_err());
    }

    #[tokio::test]
    async fn test_loads_default_toml() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("default.toml"),
            "[marketplace]\nconversation_limit = 50\n\n[cache]\nbackend = \"disabled\"\n",
        )
        .unwrap();

        let loader = ConfigLoader::new(dir.path()).unwrap();
        let config = loader.get().await;
        assert_eq!(config.marketplace.conversation_limit, 50);
        assert_eq!(config.cache.backend, CacheBackend::Disabled);
    }

    #[tokio::test]
    async fn test_reload_picks_up_changes() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("default.toml");
        fs::write(&path, "[marketplace]\ndefault_page_size = 20\n").unwrap();

        let loader = ConfigLoader::new(dir.path()).unwrap();
        assert_eq!(loader.get().await.marketplace.default_page_size, 20);

        fs::write(&path, "[marketplace]\ndefault_page_size = 30\n").unwrap();
        loader.reload().await.unwrap();
        assert_eq!(loader.get().await.marketplace.default_page_size, 30);
    }
}
