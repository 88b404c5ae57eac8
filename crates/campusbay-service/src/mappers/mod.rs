//! Entity-DTO mappers that need data from more than one entity.
//!
//! Single-entity conversions are `From` impls on the DTOs themselves.

use crate::dto::{DirectMessageResponse, ItemBrief, ItemResponse, UserSummary};
use campusbay_core::{CampusBayError, CampusBayResult, ItemId, UserId};
use campusbay_domain::{Item, Message};
use std::collections::HashMap;

/// Attaches seller summaries to a batch of items.
#[must_use]
pub fn items_with_sellers(
    items: Vec<Item>,
    sellers: &HashMap<UserId, UserSummary>,
) -> Vec<ItemResponse> {
    items
        .into_iter()
        .map(|item| {
            let seller = sellers.get(&item.seller_id).cloned();
            ItemResponse::with_seller(item, seller)
        })
        .collect()
}

impl From<&Item> for ItemBrief {
    fn from(item: &Item) -> Self {
        Self {
            id: item.id,
            title: item.title.clone(),
            price: item.price,
            image_url: item.primary_image().to_string(),
        }
    }
}

/// Resolves the participants and item of a message.
///
/// Both participants must be present in `users`; storage guarantees they
/// exist, so a miss is an internal inconsistency.
pub fn message_response(
    message: Message,
    users: &HashMap<UserId, UserSummary>,
    items: &HashMap<ItemId, ItemBrief>,
) -> CampusBayResult<DirectMessageResponse> {
    let message_id = message.id;
    let participant = |id: UserId| {
        users.get(&id).cloned().ok_or_else(|| {
            CampusBayError::internal(format!("User {id} referenced by message {message_id} is missing"))
        })
    };

    Ok(DirectMessageResponse {
        id: message.id,
        from: participant(message.sender_id)?,
        to: participant(message.recipient_id)?,
        item: message.item_id.and_then(|id| items.get(&id).cloned()),
        text: message.text,
        read: message.read,
        created_at: message.created_at,
    })
}
