//! # merx-core: Pure Business Logic for the Merx Admin API
//!
//! This crate is the heart of Merx. It contains all business logic as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Merx Architecture                                │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   apps/api (Axum handlers)                      │   │
//! │  │   /api/customers  /api/categories  /api/items  /api/orders      │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                ★ merx-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │  totals   │  │ validation│  │   │
//! │  │   │ Customer  │  │   Money   │  │PricedLine │  │   rules   │  │   │
//! │  │   │  Order    │  │  cents    │  │order_total│  │  checks   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    merx-db (Database Layer)                     │   │
//! │  │          SQLite queries, migrations, repositories, resolver     │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Customer, Category, ShopItem, Order, views)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`totals`] - Order total calculation over resolved line prices
//! - [`error`] - Domain error types
//! - [`validation`] - Field-level validation rules
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: Every function is deterministic - same input = same output
//! 2. **No I/O**: Database, network, file system access is FORBIDDEN here
//! 3. **Integer Money**: All monetary values are in cents (i64) to avoid float errors
//! 4. **Explicit Errors**: All errors are typed, never strings or panics
//!
//! ## Example Usage
//!
//! ```rust
//! use merx_core::money::Money;
//! use merx_core::totals::{order_total, PricedLine};
//!
//! // Two line items: 2 × $10.00 and 1 × $5.50
//! let lines = vec![
//!     PricedLine { unit_price: Money::from_cents(1000), quantity: 2 },
//!     PricedLine { unit_price: Money::from_cents(550), quantity: 1 },
//! ];
//!
//! assert_eq!(order_total(&lines).cents(), 2550); // $25.50
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod money;
pub mod totals;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use merx_core::Money` instead of
// `use merx_core::money::Money`

pub use error::ValidationError;
pub use money::Money;
pub use totals::{order_total, PricedLine};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum line items allowed in a single order.
///
/// ## Business Reason
/// Prevents runaway orders and keeps resolution cost bounded per request.
pub const MAX_ORDER_LINES: usize = 100;

/// Maximum quantity of a single line item.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_LINE_QUANTITY: i64 = 999;

/// Maximum price of a shop item, in cents ($1 billion).
///
/// ## Business Reason
/// Catches fat-fingered prices, and bounds every derivable total:
/// MAX_PRICE_CENTS x MAX_LINE_QUANTITY x MAX_ORDER_LINES stays well
/// inside i64, so line totals and order totals can never overflow.
pub const MAX_PRICE_CENTS: i64 = 100_000_000_000;

/// Maximum length of free-text fields (names, titles, descriptions).
pub const MAX_TEXT_LENGTH: usize = 200;
