//! Direct messaging controller.

use super::{parse_message_id, parse_user_id};
use crate::{
    extractors::{AuthenticatedUser, ValidatedJson},
    responses::{created, ok, ApiResult, CreatedResult},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    routing::{get, post, put},
    Router,
};
use campusbay_service::{
    ConversationsResponse, MessageResponse, SendMessageRequest, SendMessageResponse,
    ThreadResponse, UnreadCountResponse,
};
use tracing::debug;

/// Creates the messages router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(send_message))
        .route("/conversations", get(conversations))
        .route("/unread-count", get(unread_count))
        .route("/with/:user_id", get(thread))
        .route("/:id/read", put(mark_read))
}

/// Send a message to another user.
#[utoipa::path(
    post,
    path = "/api/messages",
    tag = "messages",
    security(("bearer_auth" = [])),
    request_body = SendMessageRequest,
    responses(
        (status = 201, description = "Message sent", body = SendMessageResponse),
        (status = 400, description = "Empty text, self-message or unknown item"),
        (status = 404, description = "Recipient not found")
    )
)]
pub async fn send_message(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedJson(request): ValidatedJson<SendMessageRequest>,
) -> CreatedResult<SendMessageResponse> {
    debug!("Message from {} to {}", user.sub, request.to);

    let response = state.message_service.send_message(user.id(), request).await?;
    created(response)
}

/// Most recent messages the caller sent or received.
#[utoipa::path(
    get,
    path = "/api/messages/conversations",
    tag = "messages",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Recent messages, newest first", body = ConversationsResponse)
    )
)]
pub async fn conversations(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<ConversationsResponse> {
    let response = state.message_service.conversations(user.id()).await?;
    ok(response)
}

/// Number of unread messages addressed to the caller.
#[utoipa::path(
    get,
    path = "/api/messages/unread-count",
    tag = "messages",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Unread count", body = UnreadCountResponse)
    )
)]
pub async fn unread_count(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<UnreadCountResponse> {
    let response = state.message_service.unread_count(user.id()).await?;
    ok(response)
}

/// Full thread with one user. Incoming messages are marked read.
#[utoipa::path(
    get,
    path = "/api/messages/with/{user_id}",
    tag = "messages",
    security(("bearer_auth" = [])),
    params(("user_id" = String, Path, description = "Other participant")),
    responses(
        (status = 200, description = "Thread, oldest first", body = ThreadResponse),
        (status = 404, description = "User not found")
    )
)]
pub async fn thread(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(user_id): Path<String>,
) -> ApiResult<ThreadResponse> {
    let other = parse_user_id(&user_id)?;
    let response = state.message_service.thread(user.id(), other).await?;
    ok(response)
}

/// Mark one received message as read.
#[utoipa::path(
    put,
    path = "/api/messages/{id}/read",
    tag = "messages",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Message ID")),
    responses(
        (status = 200, description = "Marked read", body = MessageResponse),
        (status = 403, description = "Not the recipient"),
        (status = 404, description = "Message not found")
    )
)]
pub async fn mark_read(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> ApiResult<MessageResponse> {
    let id = parse_message_id(&id)?;
    let response = state.message_service.mark_read(user.id(), id).await?;
    ok(response)
}
