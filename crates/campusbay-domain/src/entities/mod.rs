//! Domain entities.

mod item;
mod message;
mod user;
mod wishlist;

pub use item::*;
pub use message::*;
pub use user::*;
pub use wishlist::*;
