//! # Domain Types
//!
//! Core domain types for the Merx admin API.
//!
//! ## Entity Graph
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Entity References                               │
//! │                                                                         │
//! │   Order ──customer_id──► Customer                                      │
//! │     │                                                                   │
//! │     └── OrderLine ──shop_item_id──► ShopItem ──category_ids──► Category│
//! │                                                                         │
//! │   References are stored as IDs and expanded by the resolver on read.   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Identity
//! Every entity has an `id`: UUID v4 string, assigned by the store at
//! creation and immutable thereafter.
//!
//! ## Stored vs Resolved
//! Stored types (`Order`, `ShopItem`, ...) carry plain reference IDs.
//! View types (`OrderView`, `ShopItemView`) carry the referenced entities
//! embedded, and are what read responses serialize.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::money::Money;

// =============================================================================
// Customer
// =============================================================================

/// A registered customer. Owns no references to other entities.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Customer {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Given name.
    pub name: String,

    /// Family name.
    pub surname: String,

    /// Unique email address, stored lowercase-normalized.
    pub email: String,

    /// When the customer was created.
    pub created_at: DateTime<Utc>,

    /// When the customer was last updated.
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Category
// =============================================================================

/// A shop item category. Referenced by shop items; owns nothing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Category {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display title.
    pub title: String,

    /// Optional free-text description.
    pub description: Option<String>,

    /// When the category was created.
    pub created_at: DateTime<Utc>,

    /// When the category was last updated.
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Shop Item
// =============================================================================

/// An item available in the shop.
///
/// Category references are stored as IDs; the resolver expands them for
/// read responses. A shop item with no categories has an empty list,
/// never a missing field.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct ShopItem {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Display title.
    pub title: String,

    /// Optional free-text description.
    pub description: Option<String>,

    /// Price in cents (smallest currency unit). Never negative.
    pub price_cents: i64,

    /// Referenced category IDs (zero or more).
    ///
    /// Loaded from the link table, not a column, hence skipped by FromRow
    /// and assembled by the repository.
    #[cfg_attr(feature = "sqlx", sqlx(skip))]
    pub category_ids: Vec<String>,

    /// When the item was created.
    pub created_at: DateTime<Utc>,

    /// When the item was last updated.
    pub updated_at: DateTime<Utc>,
}

impl ShopItem {
    /// Returns the price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }
}

// =============================================================================
// Order Status
// =============================================================================

/// The fulfillment status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// Order has been placed but not yet processed.
    Pending,
    /// Order is being prepared.
    Processing,
    /// Order has left the warehouse.
    Shipped,
    /// Order reached the customer.
    Delivered,
    /// Order was cancelled.
    Cancelled,
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

// =============================================================================
// Order
// =============================================================================

/// A customer order.
///
/// `total_cents` is a derived field: it always equals the sum of
/// `line quantity × live shop item price` over the order's lines at the
/// moment the order was created or its line list last replaced. It is
/// recomputed explicitly by the order operations, never by a storage hook.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Order {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Referenced customer ID.
    pub customer_id: String,

    /// Derived total in cents. Zero for an order with no lines.
    pub total_cents: i64,

    /// Fulfillment status. Defaults to pending.
    pub status: OrderStatus,

    /// When the order was created.
    pub created_at: DateTime<Utc>,

    /// When the order was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Returns the derived total as a Money type.
    #[inline]
    pub fn total(&self) -> Money {
        Money::from_cents(self.total_cents)
    }
}

// =============================================================================
// Order Line
// =============================================================================

/// A line item embedded in an order: (shop item reference, quantity).
///
/// Lines are not independent entities; they live and die with their order.
/// `position` preserves the caller-supplied line order for reproducible
/// responses and test assertions.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct OrderLine {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Owning order ID.
    pub order_id: String,

    /// Referenced shop item ID.
    pub shop_item_id: String,

    /// Quantity ordered. Always >= 1.
    pub quantity: i64,

    /// Zero-based position within the order's line list.
    pub position: i64,
}

// =============================================================================
// Resolved Views
// =============================================================================
// What read responses serialize: reference IDs replaced by the referenced
// entity's full current representation. Missing referents (deleted since
// the reference was stored) resolve fail-soft to None / omitted entries
// rather than failing the response.

/// A shop item with its category references expanded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopItemView {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub price_cents: i64,
    /// Resolved categories. Empty list when the item has none; categories
    /// deleted since being referenced are omitted.
    pub categories: Vec<Category>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// An order line with its shop item reference expanded (including the
/// item's categories - two levels of nesting).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderLineView {
    /// Resolved shop item, or None if it was deleted after the order
    /// referenced it.
    pub shop_item: Option<ShopItemView>,
    pub quantity: i64,
}

/// An order with full relational resolution applied.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderView {
    pub id: String,
    /// Resolved customer, or None if deleted since the order was placed.
    pub customer: Option<Customer>,
    /// Resolved lines in stored order.
    pub lines: Vec<OrderLineView>,
    pub total_cents: i64,
    pub status: OrderStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// =============================================================================
// Unit Tests
// =============================================================================
