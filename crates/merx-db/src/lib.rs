//! # merx-db: Database Layer for the Merx Admin API
//!
//! This crate provides the Entity Store for the Merx system.
//! It uses SQLite for storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Merx Data Flow                                  │
//! │                                                                         │
//! │  HTTP handler (POST /api/orders)                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                      merx-db (THIS CRATE)                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐   ┌───────────────┐   ┌──────────────┐    │   │
//! │  │   │   Database    │   │  Repositories │   │   Resolver   │    │   │
//! │  │   │   (pool.rs)   │   │ (customer.rs, │   │ (resolver.rs)│    │   │
//! │  │   │               │   │  order.rs...) │   │              │    │   │
//! │  │   │ SqlitePool    │◄──│ one per       │◄──│ expands      │    │   │
//! │  │   │ + migrations  │   │ entity kind   │   │ references   │    │   │
//! │  │   └───────────────┘   └───────────────┘   └──────────────┘    │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │   SQLite (file or :memory:)                                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and the `Database` handle
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Database error types
//! - [`repository`] - One repository per entity kind
//! - [`resolver`] - Relational resolution for read responses
//!
//! ## Usage
//!
//! ```rust,ignore
//! use merx_db::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("./merx.db")).await?;
//!
//! let customer = db.customers().get_by_id("uuid-here").await?;
//! let order_view = db.resolver().order_view(&order).await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod resolver;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use resolver::Resolver;

// Repository re-exports for convenience
pub use repository::category::CategoryRepository;
pub use repository::customer::CustomerRepository;
pub use repository::order::OrderRepository;
pub use repository::shop_item::ShopItemRepository;

use uuid::Uuid;

/// Generates a new entity ID.
///
/// All entity kinds share one identity scheme: UUID v4 strings, assigned
/// by the store at creation, immutable thereafter.
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}
