//! # CampusBay Service
//!
//! Marketplace use cases: authentication, listings and their availability
//! workflow, direct messages, wishlists and development seeding.
//!
//! Service traits live at the crate root; their shaku components live in
//! [`r#impl`]. Controllers only ever see `Arc<dyn ...Service>`.

pub mod auth_service;
pub mod cache;
pub mod dto;
pub mod r#impl;
pub mod item_service;
pub mod mappers;
pub mod message_service;
pub mod seed_service;
pub mod user_summaries;
pub mod wishlist_service;

#[cfg(test)]
pub(crate) mod testing;

pub use auth_service::*;
pub use cache::*;
pub use dto::*;
pub use item_service::*;
pub use message_service::*;
pub use r#impl::*;
pub use seed_service::*;
pub use wishlist_service::*;
