//! Item entity and its availability state machine.

use crate::{AvailabilityStatus, Category};
use campusbay_core::{CampusBayError, CampusBayResult, ItemId, UserId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Location used when the seller leaves it empty.
pub const DEFAULT_LOCATION: &str = "Campus";

/// Seller-supplied fields of a new listing.
#[derive(Debug, Clone, PartialEq)]
pub struct NewItem {
    pub title: String,
    pub description: String,
    pub price: f64,
    pub category: Category,
    pub location: Option<String>,
    pub images: Vec<String>,
}

/// Partial edit of a listing; `None` leaves a field untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub category: Option<Category>,
    pub location: Option<String>,
    pub images: Option<Vec<String>>,
}

impl ItemChanges {
    /// Returns true when no field would change.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// A status transition decided by the entity, to be persisted atomically.
///
/// `from` is the status the decision was made against; storage must only
/// apply `to` while the row still carries `from`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusChange {
    pub from: AvailabilityStatus,
    pub to: AvailabilityStatus,
}

/// Every persisted column of a listing, taken as-is.
#[derive(Debug, Clone)]
pub struct StoredItem {
    pub id: ItemId,
    pub seller_id: UserId,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub category: Category,
    pub location: String,
    pub images: Vec<String>,
    pub availability_status: AvailabilityStatus,
    pub view_count: i64,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A listing offered for sale.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub seller_id: UserId,
    pub title: String,
    pub description: String,
    pub price: f64,
    pub category: Category,
    pub location: String,
    pub images: Vec<String>,
    availability_status: AvailabilityStatus,
    pub view_count: i64,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Item {
    /// Creates a new listing. New listings always start out AVAILABLE.
    #[must_use]
    pub fn list(seller_id: UserId, new: NewItem) -> Self {
        let now = Utc::now();
        Self {
            id: ItemId::new(),
            seller_id,
            title: new.title.trim().to_string(),
            description: new.description.trim().to_string(),
            price: new.price,
            category: new.category,
            location: normalize_location(new.location),
            images: normalize_images(new.images),
            availability_status: AvailabilityStatus::Available,
            view_count: 0,
            deleted_at: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Rebuilds a listing from storage without normalising anything.
    #[must_use]
    pub fn restore(stored: StoredItem) -> Self {
        Self {
            id: stored.id,
            seller_id: stored.seller_id,
            title: stored.title,
            description: stored.description,
            price: stored.price,
            category: stored.category,
            location: stored.location,
            images: stored.images,
            availability_status: stored.availability_status,
            view_count: stored.view_count,
            deleted_at: stored.deleted_at,
            created_at: stored.created_at,
            updated_at: stored.updated_at,
        }
    }

    /// Overrides the status, for in-memory stores and fixtures.
    #[must_use]
    pub fn with_status(mut self, status: AvailabilityStatus) -> Self {
        self.availability_status = status;
        self
    }

    /// Current availability status.
    #[must_use]
    pub const fn availability_status(&self) -> AvailabilityStatus {
        self.availability_status
    }

    /// Legacy flag, always derived from the status.
    #[must_use]
    pub const fn is_available(&self) -> bool {
        self.availability_status.is_available()
    }

    #[must_use]
    pub fn is_seller(&self, user_id: UserId) -> bool {
        self.seller_id == user_id
    }

    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        self.deleted_at.is_some()
    }

    /// First uploaded image, or the category placeholder.
    #[must_use]
    pub fn primary_image(&self) -> &str {
        self.images
            .first()
            .map_or_else(|| self.category.placeholder_image(), String::as_str)
    }

    /// Seller closes the sale.
    pub fn mark_sold(&mut self, actor: UserId) -> CampusBayResult<StatusChange> {
        self.ensure_visible()?;
        self.ensure_seller(actor, "Only the seller can mark this item as sold")?;
        if self.availability_status == AvailabilityStatus::Sold {
            return Err(CampusBayError::business_rule("Item is already marked as sold"));
        }
        Ok(self.transition(AvailabilityStatus::Sold))
    }

    /// Seller holds the item for a buyer.
    pub fn mark_reserved(&mut self, actor: UserId) -> CampusBayResult<StatusChange> {
        self.ensure_visible()?;
        self.ensure_seller(actor, "Only the seller can reserve this item")?;
        match self.availability_status {
            AvailabilityStatus::Reserved => {
                Err(CampusBayError::business_rule("Item is already reserved"))
            }
            AvailabilityStatus::Sold => Err(CampusBayError::business_rule(
                "A sold item cannot be reserved",
            )),
            AvailabilityStatus::Available => Ok(self.transition(AvailabilityStatus::Reserved)),
        }
    }

    /// Seller relists a sold or reserved item.
    pub fn mark_available(&mut self, actor: UserId) -> CampusBayResult<StatusChange> {
        self.ensure_visible()?;
        self.ensure_seller(actor, "Only the seller can mark this item as available")?;
        if self.availability_status == AvailabilityStatus::Available {
            return Err(CampusBayError::business_rule(
                "Item is already marked as available",
            ));
        }
        Ok(self.transition(AvailabilityStatus::Available))
    }

    /// Legacy toggle: AVAILABLE becomes SOLD, anything else becomes AVAILABLE.
    pub fn toggle(&mut self, actor: UserId) -> CampusBayResult<StatusChange> {
        self.ensure_visible()?;
        self.ensure_seller(actor, "Not allowed")?;
        let next = if self.availability_status == AvailabilityStatus::Available {
            AvailabilityStatus::Sold
        } else {
            AvailabilityStatus::Available
        };
        Ok(self.transition(next))
    }

    /// A buyer purchases the item.
    pub fn purchase(&mut self, buyer: UserId) -> CampusBayResult<StatusChange> {
        self.ensure_visible()?;
        if self.is_seller(buyer) {
            return Err(CampusBayError::forbidden("You cannot purchase your own item"));
        }
        if !self.availability_status.is_purchasable() {
            return Err(CampusBayError::business_rule("Item is already sold"));
        }
        Ok(self.transition(AvailabilityStatus::Sold))
    }

    /// Seller hides the listing.
    pub fn soft_delete(&mut self, actor: UserId) -> CampusBayResult<()> {
        self.ensure_visible()?;
        self.ensure_seller(actor, "Only the seller can delete this item")?;
        let now = Utc::now();
        self.deleted_at = Some(now);
        self.updated_at = now;
        Ok(())
    }

    /// Seller edits listing fields. The status is not editable here.
    pub fn apply_changes(&mut self, actor: UserId, changes: ItemChanges) -> CampusBayResult<()> {
        self.ensure_visible()?;
        self.ensure_seller(actor, "Only the seller can edit this item")?;
        if let Some(title) = changes.title {
            self.title = title.trim().to_string();
        }
        if let Some(description) = changes.description {
            self.description = description.trim().to_string();
        }
        if let Some(price) = changes.price {
            self.price = price;
        }
        if let Some(category) = changes.category {
            self.category = category;
        }
        if changes.location.is_some() {
            self.location = normalize_location(changes.location);
        }
        if let Some(images) = changes.images {
            self.images = normalize_images(images);
        }
        self.updated_at = Utc::now();
        Ok(())
    }

    fn transition(&mut self, to: AvailabilityStatus) -> StatusChange {
        let change = StatusChange {
            from: self.availability_status,
            to,
        };
        self.availability_status = to;
        self.updated_at = Utc::now();
        change
    }

    fn ensure_visible(&self) -> CampusBayResult<()> {
        if self.is_deleted() {
            return Err(CampusBayError::not_found("Item", self.id));
        }
        Ok(())
    }

    fn ensure_seller(&self, actor: UserId, message: &str) -> CampusBayResult<()> {
        if !self.is_seller(actor) {
            return Err(CampusBayError::forbidden(message));
        }
        Ok(())
    }
}

fn normalize_location(location: Option<String>) -> String {
    location
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .unwrap_or_else(|| DEFAULT_LOCATION.to_string())
}

fn normalize_images(images: Vec<String>) -> Vec<String> {
    images
        .into_iter()
        .map(|i| i.trim().to_string())
        .filter(|i| !i.is_empty())
        .collect()
}
