//! Browse options for listing searches.

use crate::AvailabilityStatus;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Sort order for listing searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "kebab-case")]
pub enum ListingSort {
    /// Most recently listed first.
    #[default]
    Newest,
    /// Oldest listing first.
    Oldest,
    /// Cheapest first.
    PriceLow,
    /// Most expensive first.
    PriceHigh,
    /// Most viewed first.
    Popular,
}

impl ListingSort {
    /// Parses a client-supplied sort key; unknown keys fall back to newest.
    #[must_use]
    pub fn parse_lenient(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("oldest") => Self::Oldest,
            Some("price-low") => Self::PriceLow,
            Some("price-high") => Self::PriceHigh,
            Some("popular") => Self::Popular,
            _ => Self::Newest,
        }
    }

    /// The wire representation, echoed back in list responses.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Newest => "newest",
            Self::Oldest => "oldest",
            Self::PriceLow => "price-low",
            Self::PriceHigh => "price-high",
            Self::Popular => "popular",
        }
    }
}

impl fmt::Display for ListingSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which availability states a listing search returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StatusFilter {
    /// Only items with the given status.
    Only(AvailabilityStatus),
    /// Every status.
    All,
    /// The browse default: items that can still be bought outright.
    #[default]
    AvailableOnly,
}

impl StatusFilter {
    /// Parses the `includeStatus` query value.
    ///
    /// `ALL` disables filtering, a concrete status selects it, anything else
    /// keeps the browse default.
    #[must_use]
    pub fn parse_lenient(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_uppercase()) {
            Some(v) if v == "ALL" => Self::All,
            Some(v) if v == "SOLD" => Self::Only(AvailabilityStatus::Sold),
            Some(v) if v == "RESERVED" => Self::Only(AvailabilityStatus::Reserved),
            _ => Self::AvailableOnly,
        }
    }

    /// The status the query must match, if any.
    #[must_use]
    pub const fn status(&self) -> Option<AvailabilityStatus> {
        match self {
            Self::Only(status) => Some(*status),
            Self::AvailableOnly => Some(AvailabilityStatus::Available),
            Self::All => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_parse() {
        assert_eq!(ListingSort::parse_lenient(Some("price-low")), ListingSort::PriceLow);
        assert_eq!(ListingSort::parse_lenient(Some("popular")), ListingSort::Popular);
        assert_eq!(ListingSort::parse_lenient(Some("bogus")), ListingSort::Newest);
        assert_eq!(ListingSort::parse_lenient(None), ListingSort::Newest);
    }

    #[test]
    fn test_sort_serde_matches_wire_keys() {
        let json = serde_json::to_string(&ListingSort::PriceHigh).unwrap();
        assert_eq!(json, "\"price-high\"");
        assert_eq!(ListingSort::PriceHigh.to_string(), "price-high");
    }

    #[test]
    fn test_status_filter_parse() {
        assert_eq!(StatusFilter::parse_lenient(Some("all")), StatusFilter::All);
        assert_eq!(
            StatusFilter::parse_lenient(Some("SOLD")),
            StatusFilter::Only(AvailabilityStatus::Sold)
        );
        assert_eq!(StatusFilter::parse_lenient(Some("whatever")), StatusFilter::AvailableOnly);
        assert_eq!(StatusFilter::parse_lenient(None), StatusFilter::AvailableOnly);
    }

    #[test]
    fn test_status_filter_status() {
        assert_eq!(StatusFilter::All.status(), None);
        assert_eq!(
            StatusFilter::AvailableOnly.status(),
            Some(AvailabilityStatus::Available)
        );
    }
}
