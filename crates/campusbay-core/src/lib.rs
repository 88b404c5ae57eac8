//! # CampusBay Core
//!
//! Core types, traits, and error definitions for the CampusBay marketplace.
//! Every other crate in the workspace builds on the error type, typed ids
//! and pagination primitives defined here.

pub mod error;
pub mod id;
pub mod pagination;
pub mod result;
pub mod traits;
pub mod validation;

pub use error::*;
pub use id::*;
pub use pagination::*;
pub use result::*;
pub use traits::*;
pub use validation::*;

// Re-export shaku for dependency injection
pub use shaku::Interface;
