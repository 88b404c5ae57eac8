//! Development data seeding.

use async_trait::async_trait;
use campusbay_core::{CampusBayResult, Interface};
use campusbay_repository::ClearReport;
use serde::Serialize;

/// Rows created by [`SeedService::seed`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeedReport {
    pub users: usize,
    pub items: usize,
}

/// Populates and wipes the marketplace for local development.
#[async_trait]
pub trait SeedService: Interface + Send + Sync {
    /// Replaces all data with sample users and listings.
    async fn seed(&self) -> CampusBayResult<SeedReport>;

    /// Deletes all data.
    async fn clear(&self) -> CampusBayResult<ClearReport>;
}
