//! REST API controllers.

pub mod auth_controller;
pub mod health_controller;
pub mod item_controller;
pub mod message_controller;
pub mod wishlist_controller;

pub use health_controller::*;

use crate::responses::AppError;
use campusbay_core::{CampusBayError, ItemId, MessageId, UserId};

/// Parses an item ID from a path segment.
pub(crate) fn parse_item_id(id: &str) -> Result<ItemId, AppError> {
    ItemId::parse(id).map_err(|_| AppError(CampusBayError::validation(format!("Invalid item ID: {id}"))))
}

/// Parses a user ID from a path segment.
pub(crate) fn parse_user_id(id: &str) -> Result<UserId, AppError> {
    UserId::parse(id).map_err(|_| AppError(CampusBayError::validation(format!("Invalid user ID: {id}"))))
}

/// Parses a message ID from a path segment.
pub(crate) fn parse_message_id(id: &str) -> Result<MessageId, AppError> {
    MessageId::parse(id)
        .map_err(|_| AppError(CampusBayError::validation(format!("Invalid message ID: {id}"))))
}
