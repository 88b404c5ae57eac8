//! Wishlist controller.

use super::parse_item_id;
use crate::{
    extractors::AuthenticatedUser,
    responses::{ok, ApiResult},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    routing::{get, post},
    Router,
};
use campusbay_service::{WishlistChangeResponse, WishlistCheckResponse, WishlistResponse};

/// Creates the wishlist router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(get_wishlist))
        .route("/:item_id", post(add_item).delete(remove_item))
        .route("/check/:item_id", get(check_item))
}

/// The caller's saved listings.
#[utoipa::path(
    get,
    path = "/api/wishlist",
    tag = "wishlist",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Saved listings", body = WishlistResponse)
    )
)]
pub async fn get_wishlist(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> ApiResult<WishlistResponse> {
    let response = state.wishlist_service.get_wishlist(user.id()).await?;
    ok(response)
}

/// Save a listing.
#[utoipa::path(
    post,
    path = "/api/wishlist/{item_id}",
    tag = "wishlist",
    security(("bearer_auth" = [])),
    params(("item_id" = String, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Saved", body = WishlistChangeResponse),
        (status = 404, description = "Listing not found"),
        (status = 409, description = "Already saved")
    )
)]
pub async fn add_item(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(item_id): Path<String>,
) -> ApiResult<WishlistChangeResponse> {
    let item_id = parse_item_id(&item_id)?;
    let response = state.wishlist_service.add_item(user.id(), item_id).await?;
    ok(response)
}

/// Remove a saved listing.
#[utoipa::path(
    delete,
    path = "/api/wishlist/{item_id}",
    tag = "wishlist",
    security(("bearer_auth" = [])),
    params(("item_id" = String, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Removed", body = WishlistChangeResponse),
        (status = 404, description = "No wishlist yet")
    )
)]
pub async fn remove_item(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(item_id): Path<String>,
) -> ApiResult<WishlistChangeResponse> {
    let item_id = parse_item_id(&item_id)?;
    let response = state.wishlist_service.remove_item(user.id(), item_id).await?;
    ok(response)
}

/// Whether a listing is saved.
#[utoipa::path(
    get,
    path = "/api/wishlist/check/{item_id}",
    tag = "wishlist",
    security(("bearer_auth" = [])),
    params(("item_id" = String, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Membership", body = WishlistCheckResponse)
    )
)]
pub async fn check_item(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(item_id): Path<String>,
) -> ApiResult<WishlistCheckResponse> {
    let item_id = parse_item_id(&item_id)?;
    let response = state.wishlist_service.check_item(user.id(), item_id).await?;
    ok(response)
}
