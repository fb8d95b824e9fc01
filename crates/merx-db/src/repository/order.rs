//! # Order Repository
//!
//! Database operations for orders and their embedded line items.
//!
//! ## Order Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       Order Lifecycle                                   │
//! │                                                                         │
//! │  1. CREATE                                                             │
//! │     └── insert(order, lines) → one transaction, total already         │
//! │         computed by the caller from live prices                       │
//! │                                                                         │
//! │  2. UPDATE                                                             │
//! │     └── update(order, Some(lines)) → replace the line list AND the    │
//! │         recomputed total atomically                                    │
//! │     └── update(order, None)        → status/customer change only,     │
//! │         stored total untouched by construction                        │
//! │                                                                         │
//! │  3. DELETE                                                             │
//! │     └── delete(id) → hard delete, lines cascade                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The repository never computes totals itself: `total_cents` arrives
//! precomputed on the `Order` value, so a partial total can never be
//! persisted - the transaction either writes the full new state or nothing.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use merx_core::{Order, OrderLine};

/// Repository for order database operations.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    pool: SqlitePool,
}

impl OrderRepository {
    /// Creates a new OrderRepository.
    pub fn new(pool: SqlitePool) -> Self {
        OrderRepository { pool }
    }

    /// Inserts a new order with its lines in one transaction.
    pub async fn insert(&self, order: &Order, lines: &[OrderLine]) -> DbResult<()> {
        debug!(
            id = %order.id,
            total = %order.total_cents,
            lines = lines.len(),
            "Inserting order"
        );

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO orders (id, customer_id, total_cents, status, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&order.id)
        .bind(&order.customer_id)
        .bind(order.total_cents)
        .bind(order.status)
        .bind(order.created_at)
        .bind(order.updated_at)
        .execute(&mut *tx)
        .await?;

        for line in lines {
            sqlx::query(
                r#"
                INSERT INTO order_lines (id, order_id, shop_item_id, quantity, position)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(&line.id)
            .bind(&line.order_id)
            .bind(&line.shop_item_id)
            .bind(line.quantity)
            .bind(line.position)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }

    /// Gets an order by ID (header only; lines via [`Self::get_lines`]).
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<Order>> {
        let order = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, customer_id, total_cents, status, created_at, updated_at
            FROM orders
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(order)
    }

    /// Lists all orders, oldest first.
    pub async fn list(&self) -> DbResult<Vec<Order>> {
        let orders = sqlx::query_as::<_, Order>(
            r#"
            SELECT id, customer_id, total_cents, status, created_at, updated_at
            FROM orders
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(orders)
    }

    /// Gets all lines for an order in stored (position) order.
    pub async fn get_lines(&self, order_id: &str) -> DbResult<Vec<OrderLine>> {
        let lines = sqlx::query_as::<_, OrderLine>(
            r#"
            SELECT id, order_id, shop_item_id, quantity, position
            FROM order_lines
            WHERE order_id = ?1
            ORDER BY position
            "#,
        )
        .bind(order_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(lines)
    }

    /// Updates an order's header and, optionally, replaces its line list.
    ///
    /// ## Atomicity
    /// When `new_lines` is `Some`, the header update (including the freshly
    /// recomputed `total_cents`) and the line replacement commit together or
    /// not at all. When `None`, only the header fields change and the caller
    /// passes the stored total through unchanged.
    pub async fn update(&self, order: &Order, new_lines: Option<&[OrderLine]>) -> DbResult<()> {
        debug!(
            id = %order.id,
            total = %order.total_cents,
            replace_lines = new_lines.is_some(),
            "Updating order"
        );

        let now = Utc::now();

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE orders SET
                customer_id = ?2,
                total_cents = ?3,
                status = ?4,
                updated_at = ?5
            WHERE id = ?1
            "#,
        )
        .bind(&order.id)
        .bind(&order.customer_id)
        .bind(order.total_cents)
        .bind(order.status)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Order", &order.id));
        }

        if let Some(lines) = new_lines {
            sqlx::query("DELETE FROM order_lines WHERE order_id = ?1")
                .bind(&order.id)
                .execute(&mut *tx)
                .await?;

            for line in lines {
                sqlx::query(
                    r#"
                    INSERT INTO order_lines (id, order_id, shop_item_id, quantity, position)
                    VALUES (?1, ?2, ?3, ?4, ?5)
                    "#,
                )
                .bind(&line.id)
                .bind(&line.order_id)
                .bind(&line.shop_item_id)
                .bind(line.quantity)
                .bind(line.position)
                .execute(&mut *tx)
                .await?;
            }
        }

        tx.commit().await?;

        Ok(())
    }

    /// Hard-deletes an order; its lines cascade with it.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting order");

        let result = sqlx::query("DELETE FROM orders WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("Order", id));
        }

        Ok(())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
