//! Item availability status.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Tri-state lifecycle flag of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AvailabilityStatus {
    /// Listed and open to buyers.
    #[default]
    Available,
    /// Sold; no further purchases.
    Sold,
    /// Held by the seller for a buyer.
    Reserved,
}

impl AvailabilityStatus {
    /// The storage and wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "AVAILABLE",
            Self::Sold => "SOLD",
            Self::Reserved => "RESERVED",
        }
    }

    /// The legacy boolean flag that mirrors this status.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }

    /// Checks whether a buyer may still purchase the item.
    #[must_use]
    pub const fn is_purchasable(&self) -> bool {
        !matches!(self, Self::Sold)
    }

    /// All statuses.
    #[must_use]
    pub const fn all() -> [Self; 3] {
        [Self::Available, Self::Sold, Self::Reserved]
    }
}

impl fmt::Display for AvailabilityStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AvailabilityStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "AVAILABLE" => Ok(Self::Available),
            "SOLD" => Ok(Self::Sold),
            "RESERVED" => Ok(Self::Reserved),
            other => Err(format!("Unknown availability status: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_available() {
        assert_eq!(AvailabilityStatus::default(), AvailabilityStatus::Available);
    }

    #[test]
    fn test_is_available_mirrors_status() {
        assert!(AvailabilityStatus::Available.is_available());
        assert!(!AvailabilityStatus::Sold.is_available());
        assert!(!AvailabilityStatus::Reserved.is_available());
    }

    #[test]
    fn test_purchasable() {
        assert!(AvailabilityStatus::Available.is_purchasable());
        assert!(AvailabilityStatus::Reserved.is_purchasable());
        assert!(!AvailabilityStatus::Sold.is_purchasable());
    }

    #[test]
    fn test_parse_and_display() {
        for status in AvailabilityStatus::all() {
            assert_eq!(status.to_string().parse::<AvailabilityStatus>().unwrap(), status);
        }
        assert_eq!("sold".parse::<AvailabilityStatus>().unwrap(), AvailabilityStatus::Sold);
        assert!("GONE".parse::<AvailabilityStatus>().is_err());
    }

    #[test]
    fn test_serde_uses_uppercase() {
        let json = serde_json::to_string(&AvailabilityStatus::Reserved).unwrap();
        assert_eq!(json, "\"RESERVED\"");
    }
}
