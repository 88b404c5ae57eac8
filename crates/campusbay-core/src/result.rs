//! Result type aliases for CampusBay.

use crate::CampusBayError;

/// A specialized `Result` type for CampusBay operations.
pub type CampusBayResult<T> = Result<T, CampusBayError>;
