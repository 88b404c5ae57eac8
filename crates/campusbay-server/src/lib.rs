//! # CampusBay Server Library
//!
//! Dependency injection wiring, command line parsing and startup helpers
//! for the `campusbay-server` binary.

pub mod cli;
pub mod di;
pub mod startup;
