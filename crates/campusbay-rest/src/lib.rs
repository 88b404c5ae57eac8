//! # CampusBay REST
//!
//! HTTP API for the marketplace, built on Axum.
//!
//! Every body is wrapped in [`responses::ApiResponse`]. Handlers stay thin:
//! they extract, call a service trait object from [`AppState`] and wrap the
//! result.

pub mod controllers;
pub mod extractors;
pub mod middleware;
pub mod openapi;
pub mod responses;
pub mod router;
pub mod state;

pub use router::*;
pub use state::*;
