//! # CampusBay Domain
//!
//! Marketplace entities and value objects: users, item listings with their
//! availability lifecycle, direct messages and wishlists.

pub mod entities;
pub mod value_objects;

pub use entities::*;
pub use value_objects::*;
