//! SQLite repository implementations.

mod item_repository;
mod maintenance;
mod message_repository;
mod user_repository;
mod wishlist_repository;

pub use item_repository::*;
pub use maintenance::*;
pub use message_repository::*;
pub use user_repository::*;
pub use wishlist_repository::*;

use campusbay_core::{CampusBayError, CampusBayResult};
use std::fmt::Display;
use std::str::FromStr;

/// Parses a TEXT column into a typed value, reporting corrupt rows.
fn parse_column<T>(raw: &str, column: &'static str) -> CampusBayResult<T>
where
    T: FromStr,
    T::Err: Display,
{
    raw.parse()
        .map_err(|e| CampusBayError::Internal(format!("Invalid {column} in database: {e}")))
}
