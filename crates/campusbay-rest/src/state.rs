//! Application state for Axum handlers.

use campusbay_core::HealthCheck;
use campusbay_service::{AuthService, ItemService, MessageService, WishlistService};
use shaku::{HasComponent, Module};
use std::sync::Arc;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<dyn AuthService>,
    pub item_service: Arc<dyn ItemService>,
    pub message_service: Arc<dyn MessageService>,
    pub wishlist_service: Arc<dyn WishlistService>,
    /// Probed by the readiness endpoint.
    pub health_checks: Arc<[Arc<dyn HealthCheck>]>,
}

impl AppState {
    /// Resolves every service from a shaku module.
    pub fn from_module<M>(module: &M, health_checks: Vec<Arc<dyn HealthCheck>>) -> Self
    where
        M: Module
            + HasComponent<dyn AuthService>
            + HasComponent<dyn ItemService>
            + HasComponent<dyn MessageService>
            + HasComponent<dyn WishlistService>,
    {
        Self {
            auth_service: module.resolve(),
            item_service: module.resolve(),
            message_service: module.resolve(),
            wishlist_service: module.resolve(),
            health_checks: health_checks.into(),
        }
    }
}
