//! Listing categories.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category a listing is filed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub enum Category {
    Books,
    Electronics,
    Fashion,
    Furniture,
    Stationery,
    #[default]
    General,
}

impl Category {
    /// The storage and wire representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Books => "Books",
            Self::Electronics => "Electronics",
            Self::Fashion => "Fashion",
            Self::Furniture => "Furniture",
            Self::Stationery => "Stationery",
            Self::General => "General",
        }
    }

    /// Placeholder image shown when a listing has no pictures.
    #[must_use]
    pub const fn placeholder_image(&self) -> &'static str {
        match self {
            Self::Books => "https://loremflickr.com/640/480/textbook,study?lock=101",
            Self::Electronics => "https://loremflickr.com/640/480/gadget,used?lock=102",
            Self::Fashion => "https://loremflickr.com/640/480/clothing,casual?lock=103",
            Self::Furniture => "https://loremflickr.com/640/480/bed,dorm?lock=104",
            Self::Stationery => "https://loremflickr.com/640/480/stationary,pencil?lock=105",
            Self::General => "https://loremflickr.com/640/480/object,student?lock=106",
        }
    }

    /// All categories, in display order.
    #[must_use]
    pub const fn all() -> [Self; 6] {
        [
            Self::Books,
            Self::Electronics,
            Self::Fashion,
            Self::Furniture,
            Self::Stationery,
            Self::General,
        ]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::all()
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!(
                    "Category must be one of: {}",
                    Self::all().map(|c| c.as_str()).join(", ")
                )
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("books".parse::<Category>().unwrap(), Category::Books);
        assert_eq!(" Furniture ".parse::<Category>().unwrap(), Category::Furniture);
    }

    #[test]
    fn test_parse_rejects_unknown() {
        let err = "Vehicles".parse::<Category>().unwrap_err();
        assert!(err.contains("Books, Electronics"));
    }

    #[test]
    fn test_every_category_has_distinct_placeholder() {
        let mut seen = std::collections::HashSet::new();
        for category in Category::all() {
            assert!(category.placeholder_image().starts_with("https://loremflickr.com/"));
            assert!(seen.insert(category.placeholder_image()));
        }
    }

    #[test]
    fn test_default_is_general() {
        assert_eq!(Category::default(), Category::General);
    }
}
