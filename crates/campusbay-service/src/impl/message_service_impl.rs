//! Messaging service implementation.

use crate::cache::{CacheInterface, DEFAULT_TTL};
use crate::dto::{
    ConversationsResponse, DirectMessageResponse, ItemBrief, MessageResponse, SendMessageRequest,
    SendMessageResponse, ThreadResponse, UnreadCountResponse,
};
use crate::mappers::message_response;
use crate::message_service::MessageService;
use crate::user_summaries::UserSummaries;
use async_trait::async_trait;
use campusbay_config::MarketplaceConfig;
use campusbay_core::{CampusBayError, CampusBayResult, ItemId, MessageId, UserId, ValidateExt};
use campusbay_domain::Message;
use campusbay_repository::{ItemRepository, MessageRepository, UserRepository};
use shaku::Component;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info};

/// Messaging service component.
#[derive(Component)]
#[shaku(interface = MessageService)]
pub struct MessageServiceComponent {
    #[shaku(inject)]
    message_repository: Arc<dyn MessageRepository>,
    #[shaku(inject)]
    user_repository: Arc<dyn UserRepository>,
    #[shaku(inject)]
    item_repository: Arc<dyn ItemRepository>,
    #[shaku(inject)]
    cache: Arc<dyn CacheInterface>,
    #[shaku(default)]
    marketplace: MarketplaceConfig,
    #[shaku(default = DEFAULT_TTL)]
    summary_ttl: Duration,
}

impl MessageServiceComponent {
    fn summaries(&self) -> UserSummaries<'_> {
        UserSummaries::new(self.user_repository.as_ref(), self.cache.as_ref(), self.summary_ttl)
    }

    /// Resolves participants and referenced items for a batch of messages.
    ///
    /// Items deleted since the message was sent are left out.
    async fn to_responses(&self, messages: Vec<Message>) -> CampusBayResult<Vec<DirectMessageResponse>> {
        let users = self
            .summaries()
            .load(
                messages
                    .iter()
                    .flat_map(|m| [m.sender_id, m.recipient_id])
                    .collect::<Vec<_>>(),
            )
            .await?;

        let mut item_ids: Vec<ItemId> = messages.iter().filter_map(|m| m.item_id).collect();
        item_ids.sort_unstable();
        item_ids.dedup();
        let items: HashMap<ItemId, ItemBrief> = if item_ids.is_empty() {
            HashMap::new()
        } else {
            self.item_repository
                .find_by_ids(&item_ids)
                .await?
                .iter()
                .map(|item| (item.id, ItemBrief::from(item)))
                .collect()
        };

        messages
            .into_iter()
            .map(|message| message_response(message, &users, &items))
            .collect()
    }
}

#[async_trait]
impl MessageService for MessageServiceComponent {
    async fn send_message(
        &self,
        sender_id: UserId,
        request: SendMessageRequest,
    ) -> CampusBayResult<SendMessageResponse> {
        debug!("Sending message from {} to {}", sender_id, request.to);

        request.validate_request()?;
        let message = Message::compose(sender_id, request.to, request.item_id, &request.text)?;

        if self.user_repository.find_by_id(request.to).await?.is_none() {
            return Err(CampusBayError::not_found("User", request.to));
        }
        if let Some(item_id) = request.item_id {
            if self.item_repository.find_by_id(item_id).await?.is_none() {
                return Err(CampusBayError::validation("Invalid item"));
            }
        }

        let saved = self.message_repository.save(&message).await?;
        info!("Message {} sent from {} to {}", saved.id, sender_id, saved.recipient_id);

        let mut responses = self.to_responses(vec![saved]).await?;
        let message = responses
            .pop()
            .ok_or_else(|| CampusBayError::internal("Sent message could not be resolved"))?;
        Ok(SendMessageResponse { message })
    }

    async fn conversations(&self, user_id: UserId) -> CampusBayResult<ConversationsResponse> {
        debug!("Loading conversations for: {}", user_id);

        let messages = self
            .message_repository
            .recent_for_user(user_id, self.marketplace.conversation_limit)
            .await?;
        Ok(ConversationsResponse {
            messages: self.to_responses(messages).await?,
        })
    }

    async fn thread(&self, user_id: UserId, other_id: UserId) -> CampusBayResult<ThreadResponse> {
        debug!("Loading thread between {} and {}", user_id, other_id);

        let with = self
            .summaries()
            .load_one(other_id)
            .await?
            .ok_or_else(|| CampusBayError::not_found("User", other_id))?;

        let marked = self.message_repository.mark_thread_read(user_id, other_id).await?;
        if marked > 0 {
            debug!("Marked {} messages from {} as read", marked, other_id);
        }

        let messages = self.message_repository.thread(user_id, other_id).await?;
        Ok(ThreadResponse {
            with,
            messages: self.to_responses(messages).await?,
        })
    }

    async fn mark_read(&self, user_id: UserId, message_id: MessageId) -> CampusBayResult<MessageResponse> {
        let mut message = self
            .message_repository
            .find_by_id(message_id)
            .await?
            .ok_or_else(|| CampusBayError::not_found("Message", message_id))?;

        message.mark_read(user_id)?;
        if !self.message_repository.mark_read(message_id).await? {
            return Err(CampusBayError::not_found("Message", message_id));
        }

        Ok(MessageResponse::new("Message marked as read"))
    }

    async fn unread_count(&self, user_id: UserId) -> CampusBayResult<UnreadCountResponse> {
        Ok(UnreadCountResponse {
            unread: self.message_repository.unread_count(user_id).await?,
        })
    }
}

impl std::fmt::Debug for MessageServiceComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MessageServiceComponent").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryCache;
    use crate::testing::{
        new_item, MockItemRepository, MockMessageRepository, MockUserRepository,
    };
    use campusbay_domain::{Category, User};

    struct Fixture {
        messages: Arc<MockMessageRepository>,
        users: Arc<MockUserRepository>,
        items: Arc<MockItemRepository>,
        service: MessageServiceComponent,
    }

    fn fixture() -> Fixture {
        fixture_with_limit(MarketplaceConfig::default().conversation_limit)
    }

    fn fixture_with_limit(conversation_limit: u32) -> Fixture {
        let messages = Arc::new(MockMessageRepository::new());
        let users = Arc::new(MockUserRepository::new());
        let items = Arc::new(MockItemRepository::new());
        let service = MessageServiceComponent {
            message_repository: messages.clone(),
            user_repository: users.clone(),
            item_repository: items.clone(),
            cache: Arc::new(MemoryCache::new()),
            marketplace: MarketplaceConfig {
                conversation_limit,
                ..MarketplaceConfig::default()
            },
            summary_ttl: DEFAULT_TTL,
        };
        Fixture {
            messages,
            users,
            items,
            service,
        }
    }

    fn request(to: &User, text: &str, item_id: Option<ItemId>) -> SendMessageRequest {
        SendMessageRequest {
            to: to.id,
            text: text.to_string(),
            item_id,
        }
    }

    #[tokio::test]
    async fn test_send_message_about_item() {
        let f = fixture();
        let buyer = f.users.insert("Priya", "priya@college.edu");
        let seller = f.users.insert("Rahul", "rahul@college.edu");
        let item = f.items.insert(new_item(seller.id, "Calculator", 600.0, Category::Electronics));

        let sent = f
            .service
            .send_message(buyer.id, request(&seller, "  Is this still available? ", Some(item.id)))
            .await
            .unwrap()
            .message;
        assert_eq!(sent.text, "Is this still available?");
        assert_eq!(sent.from.name, "Priya");
        assert_eq!(sent.to.name, "Rahul");
        assert!(!sent.read);
        let brief = sent.item.unwrap();
        assert_eq!(brief.title, "Calculator");
        assert_eq!(brief.image_url, Category::Electronics.placeholder_image());
        assert_eq!(f.messages.all().len(), 1);
    }

    #[tokio::test]
    async fn test_send_message_rejections() {
        let f = fixture();
        let sender = f.users.insert("Sneha", "sneha@college.edu");
        let other = f.users.insert("Karan", "karan@college.edu");

        let err = f
            .service
            .send_message(sender.id, request(&sender, "Hi me", None))
            .await
            .unwrap_err();
        assert!(matches!(err, CampusBayError::BusinessRule(_)));

        let err = f
            .service
            .send_message(sender.id, request(&other, "   ", None))
            .await
            .unwrap_err();
        assert!(matches!(err, CampusBayError::Validation(_)));

        let err = f
            .service
            .send_message(sender.id, request(&other, "About this", Some(ItemId::new())))
            .await
            .unwrap_err();
        match err {
            CampusBayError::Validation(message) => assert_eq!(message, "Invalid item"),
            other => panic!("expected validation error, got {other:?}"),
        }

        let ghost = SendMessageRequest {
            to: UserId::new(),
            text: "Hello?".to_string(),
            item_id: None,
        };
        let err = f.service.send_message(sender.id, ghost).await.unwrap_err();
        assert_eq!(err.status_code(), 404);
        assert!(f.messages.all().is_empty());
    }

    #[tokio::test]
    async fn test_conversations_are_newest_first_and_limited() {
        let f = fixture_with_limit(2);
        let me = f.users.insert("Ananya", "ananya@college.edu");
        let a = f.users.insert("Arjun", "arjun@college.edu");
        let b = f.users.insert("Meera", "meera@college.edu");

        for (from, to, text) in [(&me, &a, "first"), (&a, &me, "second"), (&b, &me, "third")] {
            f.service
                .send_message(from.id, request(to, text, None))
                .await
                .unwrap();
        }

        let conversations = f.service.conversations(me.id).await.unwrap();
        let texts: Vec<&str> = conversations.messages.iter().map(|m| m.text.as_str()).collect();
        assert_eq!(texts, vec!["third", "second"]);
    }

    #[tokio::test]
    async fn test_thread_marks_incoming_read() {
        let f = fixture();
        let me = f.users.insert("Vikram", "vikram@college.edu");
        let other = f.users.insert("Tanvi", "tanvi@college.edu");
        let item = f.items.insert(new_item(me.id, "Hoodie", 700.0, Category::Fashion));

        f.service
            .send_message(other.id, request(&me, "Can I see it?", Some(item.id)))
            .await
            .unwrap();
        f.service
            .send_message(me.id, request(&other, "Sure", None))
            .await
            .unwrap();
        assert_eq!(f.service.unread_count(me.id).await.unwrap().unread, 1);
        assert_eq!(f.service.unread_count(other.id).await.unwrap().unread, 1);

        let thread = f.service.thread(me.id, other.id).await.unwrap();
        assert_eq!(thread.with.name, "Tanvi");
        assert_eq!(thread.messages.len(), 2);
        assert_eq!(thread.messages[0].text, "Can I see it?");
        assert!(thread.messages[0].read);

        assert_eq!(f.service.unread_count(me.id).await.unwrap().unread, 0);
        // The other side's unread message is untouched.
        assert_eq!(f.service.unread_count(other.id).await.unwrap().unread, 1);

        let err = f.service.thread(me.id, UserId::new()).await.unwrap_err();
        assert_eq!(err.status_code(), 404);
    }

    #[tokio::test]
    async fn test_deleted_item_drops_from_message() {
        let f = fixture();
        let buyer = f.users.insert("Isha", "isha@college.edu");
        let seller = f.users.insert("Rohan", "rohan@college.edu");
        let item = f.items.insert(new_item(seller.id, "Bookshelf", 1200.0, Category::Furniture));

        f.service
            .send_message(buyer.id, request(&seller, "Interested", Some(item.id)))
            .await
            .unwrap();
        f.items.soft_delete(item.id).await.unwrap();

        let conversations = f.service.conversations(seller.id).await.unwrap();
        assert!(conversations.messages[0].item.is_none());
    }

    #[tokio::test]
    async fn test_mark_read_recipient_only() {
        let f = fixture();
        let sender = f.users.insert("Divya", "divya@college.edu");
        let recipient = f.users.insert("Kabir", "kabir@college.edu");

        let sent = f
            .service
            .send_message(sender.id, request(&recipient, "Hello", None))
            .await
            .unwrap()
            .message;

        let err = f.service.mark_read(sender.id, sent.id).await.unwrap_err();
        assert_eq!(err.status_code(), 403);

        let ok = f.service.mark_read(recipient.id, sent.id).await.unwrap();
        assert_eq!(ok.message, "Message marked as read");
        assert_eq!(f.service.unread_count(recipient.id).await.unwrap().unread, 0);

        let err = f.service.mark_read(recipient.id, MessageId::new()).await.unwrap_err();
        assert_eq!(err.status_code(), 404);
    }
}
