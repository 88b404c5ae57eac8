//! Listing DTOs.

use super::UserSummary;
use campusbay_core::{rules, CampusBayError, CampusBayResult, ItemId, Page, PageInfo, UserId};
use campusbay_domain::{AvailabilityStatus, Category, Item, ItemChanges, ListingSort, NewItem};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::{Validate, ValidationError};

/// A blank category counts as unset.
fn category_name(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Ok(());
    }
    value
        .parse::<Category>()
        .map(|_| ())
        .map_err(|message| ValidationError::new("category").with_message(message.into()))
}

fn parse_category(value: Option<&str>) -> CampusBayResult<Option<Category>> {
    value
        .filter(|v| !v.trim().is_empty())
        .map(|v| v.parse::<Category>().map_err(CampusBayError::Validation))
        .transpose()
}

/// Request to list a new item.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateItemRequest {
    #[validate(custom(function = "rules::title_length"))]
    pub title: String,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    #[validate(range(min = 0.0, message = "Price must be a positive number"))]
    pub price: f64,

    /// Defaults to `General`.
    #[validate(custom(function = "category_name"))]
    pub category: Option<String>,

    /// Defaults to `Campus`.
    #[validate(length(max = 100, message = "Location must be at most 100 characters"))]
    pub location: Option<String>,

    #[serde(default)]
    #[validate(
        length(max = 10, message = "At most 10 images are allowed"),
        custom(function = "rules::image_urls")
    )]
    pub images: Vec<String>,
}

impl CreateItemRequest {
    /// Converts a validated request into the domain input.
    pub fn into_new_item(self) -> CampusBayResult<NewItem> {
        Ok(NewItem {
            category: parse_category(self.category.as_deref())?.unwrap_or_default(),
            title: self.title,
            description: self.description.unwrap_or_default(),
            price: self.price,
            location: self.location,
            images: self.images,
        })
    }
}

/// Partial edit of a listing. Absent fields are left unchanged.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateItemRequest {
    #[validate(custom(function = "rules::title_length"))]
    pub title: Option<String>,

    #[validate(length(max = 2000, message = "Description must be at most 2000 characters"))]
    pub description: Option<String>,

    #[validate(range(min = 0.0, message = "Price must be a positive number"))]
    pub price: Option<f64>,

    #[validate(custom(function = "category_name"))]
    pub category: Option<String>,

    #[validate(length(max = 100, message = "Location must be at most 100 characters"))]
    pub location: Option<String>,

    #[validate(
        length(max = 10, message = "At most 10 images are allowed"),
        custom(function = "rules::image_urls")
    )]
    pub images: Option<Vec<String>>,
}

impl UpdateItemRequest {
    /// Converts a validated request into domain changes.
    pub fn into_changes(self) -> CampusBayResult<ItemChanges> {
        Ok(ItemChanges {
            category: parse_category(self.category.as_deref())?,
            title: self.title,
            description: self.description,
            price: self.price,
            location: self.location,
            images: self.images,
        })
    }
}

/// Query string of the listing search.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListItemsQuery {
    /// Case-insensitive text matched against title and description.
    #[validate(length(max = 100, message = "Search text must be at most 100 characters"))]
    pub q: Option<String>,
    /// Exact category filter.
    #[validate(custom(function = "category_name"))]
    pub category: Option<String>,
    /// 1-based page number.
    pub page: Option<u32>,
    /// Page size, capped at 100.
    pub limit: Option<u32>,
    /// `AVAILABLE` (default), `SOLD`, `RESERVED` or `ALL`.
    pub include_status: Option<String>,
    /// `newest` (default), `oldest`, `price-low`, `price-high` or `popular`.
    pub sort: Option<String>,
}

impl ListItemsQuery {
    /// The trimmed search text, if any.
    #[must_use]
    pub fn text(&self) -> Option<String> {
        self.q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(ToString::to_string)
    }

    /// The parsed category filter.
    pub fn category(&self) -> CampusBayResult<Option<Category>> {
        parse_category(self.category.as_deref())
    }
}

/// A listing as returned to clients.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ItemResponse {
    pub id: ItemId,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub category: Category,
    pub location: String,
    pub images: Vec<String>,
    /// First image, or the category placeholder.
    pub image_url: String,
    pub availability_status: AvailabilityStatus,
    /// Mirrors `availabilityStatus == AVAILABLE`.
    pub is_available: bool,
    pub view_count: i64,
    pub seller_id: UserId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller: Option<UserSummary>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ItemResponse {
    /// Builds a response with the seller summary attached.
    #[must_use]
    pub fn with_seller(item: Item, seller: Option<UserSummary>) -> Self {
        Self {
            id: item.id,
            image_url: item.primary_image().to_string(),
            availability_status: item.availability_status(),
            is_available: item.is_available(),
            title: item.title,
            description: item.description,
            price: item.price,
            category: item.category,
            location: item.location,
            images: item.images,
            view_count: item.view_count,
            seller_id: item.seller_id,
            seller,
            created_at: item.created_at,
            updated_at: item.updated_at,
        }
    }
}

impl From<Item> for ItemResponse {
    fn from(item: Item) -> Self {
        Self::with_seller(item, None)
    }
}

/// A page of listings.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ItemListResponse {
    pub items: Vec<ItemResponse>,
    pub pagination: PageInfo,
    /// The sort order actually applied.
    pub sort: ListingSort,
}

impl ItemListResponse {
    #[must_use]
    pub fn new(page: Page<ItemResponse>, sort: ListingSort) -> Self {
        Self {
            items: page.items,
            pagination: page.pagination,
            sort,
        }
    }
}

/// Wraps a single listing.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ItemDetailResponse {
    pub item: ItemResponse,
}

/// A listing plus a human-readable outcome, returned by create and status actions.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ItemActionResponse {
    pub item: ItemResponse,
    pub message: String,
}

impl ItemActionResponse {
    #[must_use]
    pub fn new(item: ItemResponse, message: impl Into<String>) -> Self {
        Self {
            item,
            message: message.into(),
        }
    }
}

/// Acknowledges a deletion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeleteItemResponse {
    pub ok: bool,
    pub message: String,
}
