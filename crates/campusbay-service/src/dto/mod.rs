//! Data Transfer Objects (DTOs).
//!
//! Wire names are camelCase to match the marketplace frontend.

mod auth_dto;
mod item_dto;
mod message_dto;
mod user_dto;
mod wishlist_dto;

pub use auth_dto::*;
pub use item_dto::*;
pub use message_dto::*;
pub use user_dto::*;
pub use wishlist_dto::*;
