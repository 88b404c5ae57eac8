//! OpenAPI document for the marketplace API.

use crate::controllers::{
    auth_controller, health_controller, item_controller, message_controller, wishlist_controller,
    ComponentHealth, HealthResponse, PingResponse, ReadinessResponse,
};
use campusbay_core::{ErrorResponse, FieldError, ItemId, MessageId, PageInfo, UserId};
use campusbay_domain::{AvailabilityStatus, Category, ListingSort};
use campusbay_service::{
    AuthResponse, ConversationsResponse, CreateItemRequest, DeleteItemResponse,
    DirectMessageResponse, ItemActionResponse, ItemBrief, ItemDetailResponse, ItemListResponse,
    ItemResponse, LoginRequest, MessageResponse, RefreshTokenRequest, RegisterRequest,
    SendMessageRequest, SendMessageResponse, ThreadResponse, UnreadCountResponse,
    UpdateItemRequest, UserResponse, UserSummary, WishlistChangeResponse, WishlistCheckResponse,
    WishlistResponse,
};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};

/// OpenAPI documentation for the CampusBay API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "CampusBay API",
        version = "1.0.0",
        description = "Campus marketplace: listings, direct messages and wishlists",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    paths(
        health_controller::health_check,
        health_controller::readiness_check,
        health_controller::liveness_check,
        health_controller::ping,
        auth_controller::register,
        auth_controller::login,
        auth_controller::refresh_token,
        auth_controller::get_current_user,
        item_controller::list_items,
        item_controller::create_item,
        item_controller::list_own_items,
        item_controller::get_item,
        item_controller::update_item,
        item_controller::delete_item,
        item_controller::mark_sold,
        item_controller::mark_reserved,
        item_controller::mark_available,
        item_controller::purchase,
        item_controller::toggle_status,
        message_controller::send_message,
        message_controller::conversations,
        message_controller::unread_count,
        message_controller::thread,
        message_controller::mark_read,
        wishlist_controller::get_wishlist,
        wishlist_controller::add_item,
        wishlist_controller::remove_item,
        wishlist_controller::check_item,
    ),
    components(
        schemas(
            UserId,
            ItemId,
            MessageId,
            PageInfo,
            ErrorResponse,
            FieldError,
            Category,
            AvailabilityStatus,
            ListingSort,
            HealthResponse,
            PingResponse,
            ComponentHealth,
            ReadinessResponse,
            RegisterRequest,
            LoginRequest,
            RefreshTokenRequest,
            AuthResponse,
            UserResponse,
            UserSummary,
            MessageResponse,
            CreateItemRequest,
            UpdateItemRequest,
            ItemResponse,
            ItemListResponse,
            ItemDetailResponse,
            ItemActionResponse,
            DeleteItemResponse,
            SendMessageRequest,
            SendMessageResponse,
            ItemBrief,
            DirectMessageResponse,
            ConversationsResponse,
            ThreadResponse,
            UnreadCountResponse,
            WishlistResponse,
            WishlistChangeResponse,
            WishlistCheckResponse,
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "health", description = "Probes"),
        (name = "auth", description = "Registration and tokens"),
        (name = "items", description = "Listings and their availability"),
        (name = "messages", description = "Direct messages between users"),
        (name = "wishlist", description = "Saved listings")
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
