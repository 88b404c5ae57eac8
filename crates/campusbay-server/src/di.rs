//! Dependency injection module using shaku.
//!
//! `AppModule` holds every component of the single-process deployment. The
//! in-memory cache is the default `CacheInterface`; Redis or a disabled cache
//! replace it through a component override.

use campusbay_config::{AppConfig, CacheBackend};
use campusbay_core::{CampusBayResult, HealthCheck};
use campusbay_repository::{
    DatabasePool, DatabasePoolInterface, DatabasePoolParameters, SqliteItemRepository,
    SqliteMaintenanceRepository, SqliteMessageRepository, SqliteUserRepository,
    SqliteWishlistRepository,
};
use campusbay_security::{PasswordHasher, TokenProvider};
use campusbay_service::{
    create_redis_pool, AuthServiceComponent, AuthServiceComponentParameters, CacheInterface,
    ItemServiceComponent, ItemServiceComponentParameters, MemoryCache, MessageServiceComponent,
    MessageServiceComponentParameters, RedisCache, SeedServiceComponent, WishlistServiceComponent,
    WishlistServiceComponentParameters,
};
use shaku::module;
use std::sync::Arc;
use tracing::info;

module! {
    pub AppModule {
        components = [
            DatabasePool,
            PasswordHasher,
            TokenProvider,
            SqliteUserRepository,
            SqliteItemRepository,
            SqliteMessageRepository,
            SqliteWishlistRepository,
            SqliteMaintenanceRepository,
            MemoryCache,
            AuthServiceComponent,
            ItemServiceComponent,
            MessageServiceComponent,
            WishlistServiceComponent,
            SeedServiceComponent,
        ],
        providers = [],
    }
}

/// A built module together with the dependencies `/ready` should probe.
pub struct AppContainer {
    pub module: Arc<AppModule>,
    pub health_checks: Vec<Arc<dyn HealthCheck>>,
}

/// Builds the application module around an open database pool.
pub fn build_app_module(config: &AppConfig, pool: Arc<DatabasePool>) -> CampusBayResult<AppContainer> {
    let marketplace = config.marketplace.clone();
    let summary_ttl = config.cache.ttl();

    let mut builder = AppModule::builder()
        .with_component_parameters::<DatabasePool>(DatabasePoolParameters {
            pool: pool.inner().clone(),
        })
        .with_component_parameters::<PasswordHasher>(PasswordHasher::parameters(
            config.security.password_hash_cost,
        ))
        .with_component_parameters::<TokenProvider>(TokenProvider::parameters(Arc::new(
            config.security.clone(),
        )))
        .with_component_parameters::<AuthServiceComponent>(AuthServiceComponentParameters {
            marketplace: marketplace.clone(),
        })
        .with_component_parameters::<ItemServiceComponent>(ItemServiceComponentParameters {
            marketplace: marketplace.clone(),
            summary_ttl,
        })
        .with_component_parameters::<MessageServiceComponent>(MessageServiceComponentParameters {
            marketplace,
            summary_ttl,
        })
        .with_component_parameters::<WishlistServiceComponent>(
            WishlistServiceComponentParameters { summary_ttl },
        );

    let mut health_checks: Vec<Arc<dyn HealthCheck>> = vec![pool];

    match config.cache.backend {
        CacheBackend::Memory => info!("Using in-memory cache"),
        CacheBackend::Redis => {
            let cache = RedisCache::new(Arc::new(create_redis_pool(&config.cache)?));
            info!("Using Redis cache at {}", config.cache.redis_url);
            health_checks.push(Arc::new(cache.clone()));
            builder = builder.with_component_override::<dyn CacheInterface>(Box::new(cache));
        }
        CacheBackend::Disabled => {
            info!("Cache disabled");
            builder =
                builder.with_component_override::<dyn CacheInterface>(Box::new(RedisCache::disabled()));
        }
    }

    Ok(AppContainer {
        module: Arc::new(builder.build()),
        health_checks,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use campusbay_config::DatabaseConfig;
    use campusbay_core::HealthStatus;
    use campusbay_repository::create_pool;
    use campusbay_security::TokenProviderInterface;
    use campusbay_service::{ItemService, SeedService};
    use shaku::HasComponent;

    async fn config(backend: CacheBackend) -> (AppConfig, Arc<DatabasePool>) {
        let mut config = AppConfig::default();
        config.database = DatabaseConfig::in_memory();
        config.security.password_hash_cost = 1;
        config.cache.backend = backend;
        let pool = create_pool(&config.database).await.unwrap();
        (config, pool)
    }

    #[tokio::test]
    async fn test_module_resolves_services() {
        let (config, pool) = config(CacheBackend::Memory).await;
        let container = build_app_module(&config, pool).unwrap();

        let _: Arc<dyn TokenProviderInterface> = container.module.resolve();
        let _: Arc<dyn ItemService> = container.module.resolve();
        let cache: Arc<dyn CacheInterface> = container.module.resolve();
        assert!(cache.is_enabled());
        assert_eq!(container.health_checks.len(), 1);
    }

    #[tokio::test]
    async fn test_seed_through_module() {
        let (config, pool) = config(CacheBackend::Memory).await;
        let container = build_app_module(&config, pool.clone()).unwrap();

        let seed: Arc<dyn SeedService> = container.module.resolve();
        let report = seed.seed().await.unwrap();
        assert_eq!(report.users, 8);
        assert_eq!(container.health_checks[0].check().await, HealthStatus::Healthy);
    }

    #[tokio::test]
    async fn test_disabled_cache_override() {
        let (config, pool) = config(CacheBackend::Disabled).await;
        let container = build_app_module(&config, pool).unwrap();

        let cache: Arc<dyn CacheInterface> = container.module.resolve();
        assert!(!cache.is_enabled());
    }
}
