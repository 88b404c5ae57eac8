//! Main application router.

use crate::{
    controllers::{
        auth_controller, health_controller, item_controller, message_controller,
        wishlist_controller,
    },
    middleware::{auth_middleware, logging_middleware, AuthMiddlewareState},
    openapi::ApiDoc,
    state::AppState,
};
use axum::{
    http::{HeaderValue, Method},
    middleware,
    routing::get,
    Json, Router,
};
use campusbay_config::ServerConfig;
use campusbay_core::HealthCheck;
use campusbay_security::TokenProviderInterface;
use campusbay_service::{AuthService, ItemService, MessageService, WishlistService};
use shaku::{HasComponent, Module};
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};
use utoipa::OpenApi;

/// Creates the application router from a shaku module.
///
/// `health_checks` are the dependencies probed by `/ready`.
pub fn create_router<M>(
    module: &M,
    server_config: &ServerConfig,
    health_checks: Vec<Arc<dyn HealthCheck>>,
) -> Router
where
    M: Module
        + HasComponent<dyn AuthService>
        + HasComponent<dyn ItemService>
        + HasComponent<dyn MessageService>
        + HasComponent<dyn WishlistService>
        + HasComponent<dyn TokenProviderInterface>,
{
    let cors = create_cors_layer(server_config);

    let token_provider: Arc<dyn TokenProviderInterface> = module.resolve();
    let auth_state = AuthMiddlewareState::new(token_provider);

    let state = AppState::from_module(module, health_checks);

    let api_router = Router::new()
        .nest("/auth", auth_controller::router())
        .nest("/items", item_controller::router())
        .nest("/messages", message_controller::router())
        .nest("/wishlist", wishlist_controller::router())
        .route("/openapi.json", get(openapi_json))
        .layer(middleware::from_fn_with_state(auth_state, auth_middleware));

    let router = Router::new()
        .merge(health_controller::router())
        .nest("/api", api_router)
        .route("/", get(root))
        .with_state(state)
        .layer(RequestBodyLimitLayer::new(server_config.max_body_size))
        .layer(TimeoutLayer::new(server_config.request_timeout()))
        .layer(CompressionLayer::new())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(middleware::from_fn(logging_middleware));

    info!("Router created with marketplace endpoints under /api");
    router
}

/// Creates a CORS layer based on server configuration.
fn create_cors_layer(server_config: &ServerConfig) -> CorsLayer {
    if !server_config.cors_enabled {
        return CorsLayer::new();
    }
    if server_config.allows_any_origin() {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = server_config
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers(Any)
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Root endpoint handler.
async fn root() -> &'static str {
    "CampusBay API"
}
