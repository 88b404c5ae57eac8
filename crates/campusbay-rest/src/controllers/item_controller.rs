//! Listing controller.
//!
//! Reads are public. Everything that changes a listing requires a bearer
//! token; the service layer decides whether the caller is the seller.

use super::parse_item_id;
use crate::{
    extractors::{ApiQuery, AuthenticatedUser, PaginationQuery, ValidatedJson},
    responses::{created, ok, ApiResult, CreatedResult},
    state::AppState,
};
use axum::{
    extract::{Path, State},
    routing::{get, put},
    Router,
};
use campusbay_service::{
    CreateItemRequest, DeleteItemResponse, ItemActionResponse, ItemDetailResponse,
    ItemListResponse, ListItemsQuery, UpdateItemRequest,
};
use tracing::debug;

/// Creates the items router.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_items).post(create_item))
        .route("/mine", get(list_own_items))
        .route("/:id", get(get_item).put(update_item).delete(delete_item))
        .route("/:id/mark-sold", put(mark_sold))
        .route("/:id/mark-reserved", put(mark_reserved))
        .route("/:id/mark-available", put(mark_available))
        .route("/:id/purchase", put(purchase))
        .route("/:id/toggle", put(toggle_status))
}

/// Browse and search listings.
#[utoipa::path(
    get,
    path = "/api/items",
    tag = "items",
    params(ListItemsQuery),
    responses(
        (status = 200, description = "Page of listings", body = ItemListResponse),
        (status = 400, description = "Unknown category or malformed query")
    )
)]
pub async fn list_items(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<ListItemsQuery>,
) -> ApiResult<ItemListResponse> {
    debug!(?query, "Listing items");

    let response = state.item_service.list_items(query).await?;
    ok(response)
}

/// Create a listing.
#[utoipa::path(
    post,
    path = "/api/items",
    tag = "items",
    security(("bearer_auth" = [])),
    request_body = CreateItemRequest,
    responses(
        (status = 201, description = "Listing created", body = ItemActionResponse),
        (status = 400, description = "Invalid listing"),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn create_item(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ValidatedJson(request): ValidatedJson<CreateItemRequest>,
) -> CreatedResult<ItemActionResponse> {
    debug!("Create item request from: {}", user.sub);

    let response = state.item_service.create_item(user.id(), request).await?;
    created(response)
}

/// The caller's own listings, including sold and reserved ones.
#[utoipa::path(
    get,
    path = "/api/items/mine",
    tag = "items",
    security(("bearer_auth" = [])),
    params(
        ("page" = Option<u32>, Query, description = "1-based page number"),
        ("limit" = Option<u32>, Query, description = "Page size")
    ),
    responses(
        (status = 200, description = "Page of own listings", body = ItemListResponse),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_own_items(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    ApiQuery(pagination): ApiQuery<PaginationQuery>,
) -> ApiResult<ItemListResponse> {
    let response = state
        .item_service
        .list_own_items(user.id(), pagination.into())
        .await?;
    ok(response)
}

/// Get a listing and count the view.
#[utoipa::path(
    get,
    path = "/api/items/{id}",
    tag = "items",
    params(("id" = String, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Listing found", body = ItemDetailResponse),
        (status = 404, description = "Listing not found")
    )
)]
pub async fn get_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<ItemDetailResponse> {
    let id = parse_item_id(&id)?;
    let response = state.item_service.get_item(id).await?;
    ok(response)
}

/// Edit a listing's fields.
#[utoipa::path(
    put,
    path = "/api/items/{id}",
    tag = "items",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Item ID")),
    request_body = UpdateItemRequest,
    responses(
        (status = 200, description = "Listing updated", body = ItemDetailResponse),
        (status = 403, description = "Not the seller"),
        (status = 404, description = "Listing not found")
    )
)]
pub async fn update_item(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
    ValidatedJson(request): ValidatedJson<UpdateItemRequest>,
) -> ApiResult<ItemDetailResponse> {
    let id = parse_item_id(&id)?;
    let response = state.item_service.update_item(id, user.id(), request).await?;
    ok(response)
}

/// Soft-delete a listing.
#[utoipa::path(
    delete,
    path = "/api/items/{id}",
    tag = "items",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Listing deleted", body = DeleteItemResponse),
        (status = 403, description = "Not the seller"),
        (status = 404, description = "Listing not found")
    )
)]
pub async fn delete_item(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> ApiResult<DeleteItemResponse> {
    let id = parse_item_id(&id)?;
    let response = state.item_service.delete_item(id, user.id()).await?;
    ok(response)
}

/// Seller marks a listing as sold.
#[utoipa::path(
    put,
    path = "/api/items/{id}/mark-sold",
    tag = "items",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Listing sold", body = ItemActionResponse),
        (status = 400, description = "Already sold"),
        (status = 403, description = "Not the seller"),
        (status = 409, description = "Concurrent modification")
    )
)]
pub async fn mark_sold(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> ApiResult<ItemActionResponse> {
    let id = parse_item_id(&id)?;
    let response = state.item_service.mark_sold(id, user.id()).await?;
    ok(response)
}

/// Seller reserves a listing.
#[utoipa::path(
    put,
    path = "/api/items/{id}/mark-reserved",
    tag = "items",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Listing reserved", body = ItemActionResponse),
        (status = 400, description = "Listing is not available"),
        (status = 403, description = "Not the seller")
    )
)]
pub async fn mark_reserved(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> ApiResult<ItemActionResponse> {
    let id = parse_item_id(&id)?;
    let response = state.item_service.mark_reserved(id, user.id()).await?;
    ok(response)
}

/// Seller puts a listing back on the market.
#[utoipa::path(
    put,
    path = "/api/items/{id}/mark-available",
    tag = "items",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Listing available", body = ItemActionResponse),
        (status = 400, description = "Already available"),
        (status = 403, description = "Not the seller")
    )
)]
pub async fn mark_available(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> ApiResult<ItemActionResponse> {
    let id = parse_item_id(&id)?;
    let response = state.item_service.mark_available(id, user.id()).await?;
    ok(response)
}

/// Buy a listing.
#[utoipa::path(
    put,
    path = "/api/items/{id}/purchase",
    tag = "items",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Purchase complete", body = ItemActionResponse),
        (status = 400, description = "Already sold"),
        (status = 403, description = "Own listing"),
        (status = 409, description = "Concurrent modification")
    )
)]
pub async fn purchase(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> ApiResult<ItemActionResponse> {
    let id = parse_item_id(&id)?;
    let response = state.item_service.purchase(id, user.id()).await?;
    ok(response)
}

/// Flip a listing between available and sold.
#[utoipa::path(
    put,
    path = "/api/items/{id}/toggle",
    tag = "items",
    security(("bearer_auth" = [])),
    params(("id" = String, Path, description = "Item ID")),
    responses(
        (status = 200, description = "Status toggled", body = ItemDetailResponse),
        (status = 403, description = "Not the seller")
    )
)]
pub async fn toggle_status(
    State(state): State<AppState>,
    user: AuthenticatedUser,
    Path(id): Path<String>,
) -> ApiResult<ItemDetailResponse> {
    let id = parse_item_id(&id)?;
    let response = state.item_service.toggle_status(id, user.id()).await?;
    ok(response)
}
