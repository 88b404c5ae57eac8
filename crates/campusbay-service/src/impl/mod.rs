//! Service implementations.
//!
//! Each service is a shaku component whose collaborators are injected as
//! `Arc<dyn Trait>`. Trait definitions live in the parent module.

pub mod auth_service_impl;
pub mod item_service_impl;
pub mod message_service_impl;
pub mod seed_service_impl;
pub mod wishlist_service_impl;

pub use auth_service_impl::{AuthServiceComponent, AuthServiceComponentParameters};
pub use item_service_impl::{ItemServiceComponent, ItemServiceComponentParameters};
pub use message_service_impl::{MessageServiceComponent, MessageServiceComponentParameters};
pub use seed_service_impl::{SeedServiceComponent, SeedServiceComponentParameters};
pub use wishlist_service_impl::{WishlistServiceComponent, WishlistServiceComponentParameters};
