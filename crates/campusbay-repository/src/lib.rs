//! # CampusBay Repository
//!
//! Data access for the marketplace over SQLite.
//!
//! ```text
//! Service
//!   ↓  Arc<dyn ItemRepository>   (domain interface)
//! SqliteItemRepository           (SQLx queries)
//!   ↓  Arc<dyn DatabasePoolInterface>
//! SQLite (WAL, foreign keys on)
//! ```
//!
//! Migrations live in the workspace `migrations/` directory and are embedded
//! at compile time.

pub mod pool;
pub mod sqlite;
pub mod traits;

pub use pool::*;
pub use sqlite::*;
pub use traits::*;
