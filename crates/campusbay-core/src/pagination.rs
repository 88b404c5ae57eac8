//! Pagination types for list operations.

use serde::{Deserialize, Serialize};

/// A request for a page of results.
///
/// Pages are numbered from 1, matching what the marketplace clients send.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    /// The page number (1-indexed).
    pub page: u32,
    /// The number of items per page.
    pub limit: u32,
}

impl PageRequest {
    /// The default page size.
    pub const DEFAULT_LIMIT: u32 = 50;
    /// The maximum allowed page size.
    pub const MAX_LIMIT: u32 = 100;

    /// Creates a new page request, clamping out-of-range values.
    #[must_use]
    pub fn new(page: u32, limit: u32) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(1, Self::MAX_LIMIT),
        }
    }

    /// Creates a page request for the first page with default size.
    #[must_use]
    pub fn first() -> Self {
        Self::new(1, Self::DEFAULT_LIMIT)
    }

    /// Returns the row offset for database queries.
    #[must_use]
    pub const fn offset(&self) -> i64 {
        (self.page as i64 - 1) * self.limit as i64
    }

    /// Returns the row limit for database queries.
    #[must_use]
    pub const fn limit(&self) -> i64 {
        self.limit as i64
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::first()
    }
}

/// Information about a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PageInfo {
    /// The total number of matching items across all pages.
    pub total: u64,
    /// The current page number (1-indexed).
    pub page: u32,
    /// The number of items per page.
    pub limit: u32,
    /// The total number of pages.
    pub pages: u64,
}

impl PageInfo {
    /// Creates a new page info.
    #[must_use]
    pub fn new(request: PageRequest, total: u64) -> Self {
        let limit = u64::from(request.limit);
        let pages = if limit > 0 { total.div_ceil(limit) } else { 0 };

        Self {
            total,
            page: request.page,
            limit: request.limit,
            pages,
        }
    }
}

/// A page of results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// The items on this page.
    pub items: Vec<T>,
    /// Information about this page.
    pub pagination: PageInfo,
}

impl<T> Page<T> {
    /// Creates a new page.
    #[must_use]
    pub fn new(items: Vec<T>, request: PageRequest, total: u64) -> Self {
        Self {
            items,
            pagination: PageInfo::new(request, total),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_request_defaults() {
        let request = PageRequest::default();
        assert_eq!(request.page, 1);
        assert_eq!(request.limit, 50);
        assert_eq!(request.offset(), 0);
    }

    #[test]
    fn test_page_request_clamps() {
        let request = PageRequest::new(0, 1000);
        assert_eq!(request.page, 1);
        assert_eq!(request.limit, PageRequest::MAX_LIMIT);

        let request = PageRequest::new(3, 0);
        assert_eq!(request.limit, 1);
    }

    #[test]
    fn test_offset() {
        assert_eq!(PageRequest::new(3, 20).offset(), 40);
    }

    #[test]
    fn test_page_info_rounds_up() {
        let info = PageInfo::new(PageRequest::new(1, 50), 101);
        assert_eq!(info.pages, 3);
        assert_eq!(info.total, 101);
    }

    #[test]
    fn test_page_serializes_items_and_pagination() {
        let page = Page::new(vec!["a"], PageRequest::new(1, 10), 1);
        let json = serde_json::to_value(&page).unwrap();
        assert_eq!(json["items"][0], "a");
        assert_eq!(json["pagination"]["pages"], 1);
        assert_eq!(json["pagination"]["limit"], 10);
    }
}
