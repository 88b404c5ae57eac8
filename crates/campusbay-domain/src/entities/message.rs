//! Direct message entity.

use campusbay_core::{CampusBayError, CampusBayResult, ItemId, MessageId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Longest accepted message body, in characters.
pub const MAX_MESSAGE_LEN: usize = 1000;

/// A message between two users, optionally about a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: MessageId,
    pub sender_id: UserId,
    pub recipient_id: UserId,
    pub item_id: Option<ItemId>,
    pub text: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl Message {
    /// Composes a new unread message.
    pub fn compose(
        sender_id: UserId,
        recipient_id: UserId,
        item_id: Option<ItemId>,
        text: &str,
    ) -> CampusBayResult<Self> {
        if sender_id == recipient_id {
            return Err(CampusBayError::business_rule(
                "You cannot send a message to yourself",
            ));
        }
        let text = text.trim();
        let len = text.chars().count();
        if len == 0 || len > MAX_MESSAGE_LEN {
            return Err(CampusBayError::validation(format!(
                "text: Message must be 1-{MAX_MESSAGE_LEN} characters"
            )));
        }
        Ok(Self {
            id: MessageId::new(),
            sender_id,
            recipient_id,
            item_id,
            text: text.to_string(),
            read: false,
            created_at: Utc::now(),
        })
    }

    /// Returns true if the user sent or received this message.
    #[must_use]
    pub fn involves(&self, user_id: UserId) -> bool {
        self.sender_id == user_id || self.recipient_id == user_id
    }

    /// The other participant from `user_id`'s point of view.
    #[must_use]
    pub fn counterpart(&self, user_id: UserId) -> UserId {
        if self.sender_id == user_id {
            self.recipient_id
        } else {
            self.sender_id
        }
    }

    /// Recipient acknowledges the message.
    pub fn mark_read(&mut self, actor: UserId) -> CampusBayResult<()> {
        if self.recipient_id != actor {
            return Err(CampusBayError::forbidden(
                "Only the recipient can mark this message as read",
            ));
        }
        self.read = true;
        Ok(())
    }
}
