//! # Repository Module
//!
//! One repository per entity kind, all over the shared pool.
//!
//! ## Repository Pattern
//! ```text
//! Database ──► customers() / categories() / shop_items() / orders()
//!                   │
//!                   ▼
//!           insert / get_by_id / list / update / delete
//! ```
//!
//! Repositories persist and fetch stored entities with plain reference IDs;
//! expanding those references for read responses is the resolver's job.
//!
//! ## Available Repositories
//!
//! - [`customer::CustomerRepository`] - Customer CRUD
//! - [`category::CategoryRepository`] - Category CRUD
//! - [`shop_item::ShopItemRepository`] - Shop item CRUD + category links
//! - [`order::OrderRepository`] - Order CRUD + line replacement

pub mod category;
pub mod customer;
pub mod order;
pub mod shop_item;
