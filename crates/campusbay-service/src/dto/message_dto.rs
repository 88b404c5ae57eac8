//! Direct message DTOs.

use super::UserSummary;
use campusbay_core::{rules, ItemId, MessageId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

/// Request to message another user.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    /// Recipient.
    pub to: UserId,

    #[validate(
        length(min = 1, max = 1000, message = "Message must be 1-1000 characters"),
        custom(function = "rules::not_blank")
    )]
    pub text: String,

    /// Listing the message is about, if any.
    pub item_id: Option<ItemId>,
}

/// The listing a message refers to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemBrief {
    pub id: ItemId,
    pub title: String,
    pub price: f64,
    pub image_url: String,
}

/// A message with both participants resolved.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DirectMessageResponse {
    pub id: MessageId,
    pub from: UserSummary,
    pub to: UserSummary,
    /// Absent when the message has no item context or the item was deleted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<ItemBrief>,
    pub text: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct SendMessageResponse {
    pub message: DirectMessageResponse,
}

/// Recent messages sent or received by the caller, newest first.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ConversationsResponse {
    pub messages: Vec<DirectMessageResponse>,
}

/// Every message exchanged with one other user, oldest first.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ThreadResponse {
    pub with: UserSummary,
    pub messages: Vec<DirectMessageResponse>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UnreadCountResponse {
    pub unread: u64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[test]
    fn test_send_request_wire_format() {
        let to = UserId::new();
        let json = format!(r#"{{"to":"{to}","text":"Is this still available?"}}"#);
        let request: SendMessageRequest = serde_json::from_str(&json).unwrap();
        assert_eq!(request.to, to);
        assert!(request.item_id.is_none());
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_send_request_rejects_blank_and_long_text() {
        let mut request = SendMessageRequest {
            to: UserId::new(),
            text: "   ".to_string(),
            item_id: None,
        };
        assert!(request.validate().is_err());

        request.text = "x".repeat(1001);
        assert!(request.validate().is_err());
    }
}
