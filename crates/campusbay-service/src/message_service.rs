//! Messaging service trait definition.

use crate::dto::{
    ConversationsResponse, MessageResponse, SendMessageRequest, SendMessageResponse,
    ThreadResponse, UnreadCountResponse,
};
use async_trait::async_trait;
use campusbay_core::{CampusBayResult, Interface, MessageId, UserId};

/// Messaging service trait.
#[async_trait]
pub trait MessageService: Interface + Send + Sync {
    /// Sends a message, optionally about a listing.
    async fn send_message(
        &self,
        sender_id: UserId,
        request: SendMessageRequest,
    ) -> CampusBayResult<SendMessageResponse>;

    /// The caller's most recent messages, newest first.
    async fn conversations(&self, user_id: UserId) -> CampusBayResult<ConversationsResponse>;

    /// The full exchange with another user, oldest first.
    ///
    /// Messages the caller received in this thread are marked read.
    async fn thread(&self, user_id: UserId, other_id: UserId) -> CampusBayResult<ThreadResponse>;

    /// Marks one received message read.
    async fn mark_read(&self, user_id: UserId, message_id: MessageId) -> CampusBayResult<MessageResponse>;

    async fn unread_count(&self, user_id: UserId) -> CampusBayResult<UnreadCountResponse>;
}
