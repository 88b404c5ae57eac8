//! # CampusBay Config
//!
//! Configuration management for CampusBay.
//! Supports layered configuration from TOML files, environment variables
//! and a `.env` file, with runtime reload.

mod app_config;
mod loader;

pub use app_config::*;
pub use loader::*;
