//! # Shop Item Repository
//!
//! Database operations for shop items and their category references.
//!
//! ## Storage Layout
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  shop_items              shop_item_categories                           │
//! │  ┌────────────────┐      ┌──────────────────────────────┐              │
//! │  │ id             │◄─────│ shop_item_id (FK, CASCADE)   │              │
//! │  │ title          │      │ category_id  (no FK)         │              │
//! │  │ price_cents    │      │ position                     │              │
//! │  └────────────────┘      └──────────────────────────────┘              │
//! │                                                                         │
//! │  The link rows live and die with the item. category_id carries no      │
//! │  foreign key: categories may be deleted out from under an item, and    │
//! │  reads resolve the leftover link fail-soft.                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use merx_core::ShopItem;

/// Repository for shop item database operations.
#[derive(Debug, Clone)]
pub struct ShopItemRepository {
    pool: SqlitePool,
}

impl ShopItemRepository {
    /// Creates a new ShopItemRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ShopItemRepository { pool }
    }

    /// Inserts a new shop item together with its category links.
    ///
    /// The row and its links go in one transaction - an item is never
    /// visible with half its references.
    pub async fn insert(&self, item: &ShopItem) -> DbResult<()> {
        debug!(id = %item.id, title = %item.title, "Inserting shop item");

        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            INSERT INTO shop_items (id, title, description, price_cents, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6)
            "#,
        )
        .bind(&item.id)
        .bind(&item.title)
        .bind(&item.description)
        .bind(item.price_cents)
        .bind(item.created_at)
        .bind(item.updated_at)
        .execute(&mut *tx)
        .await?;

        for (position, category_id) in item.category_ids.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO shop_item_categories (shop_item_id, category_id, position)
                VALUES (?1, ?2, ?3)
                "#,
            )
            .bind(&item.id)
            .bind(category_id)
            .bind(position as i64)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }

    /// Gets a shop item by ID, with its category reference IDs assembled
    /// from the link table.
    pub async fn get_by_id(&self, id: &str) -> DbResult<Option<ShopItem>> {
        let item = sqlx::query_as::<_, ShopItem>(
            r#"
            SELECT id, title, description, price_cents, created_at, updated_at
            FROM shop_items
            WHERE id = ?1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        match item {
            Some(mut item) => {
                item.category_ids = self.category_ids(&item.id).await?;
                Ok(Some(item))
            }
            None => Ok(None),
        }
    }

    /// Lists all shop items, oldest first, with category IDs assembled.
    pub async fn list(&self) -> DbResult<Vec<ShopItem>> {
        let mut items = sqlx::query_as::<_, ShopItem>(
            r#"
            SELECT id, title, description, price_cents, created_at, updated_at
            FROM shop_items
            ORDER BY created_at, id
            "#,
        )
        .fetch_all(&self.pool)
        .await?;

        for item in &mut items {
            item.category_ids = self.category_ids(&item.id).await?;
        }

        Ok(items)
    }

    /// Updates an existing shop item and replaces its category links.
    pub async fn update(&self, item: &ShopItem) -> DbResult<()> {
        debug!(id = %item.id, "Updating shop item");

        let now = Utc::now();

        let mut tx = self.pool.begin().await?;

        let result = sqlx::query(
            r#"
            UPDATE shop_items SET
                title = ?2,
                description = ?3,
                price_cents = ?4,
                updated_at = ?5
            WHERE id = ?1
            "#,
        )
        .bind(&item.id)
        .bind(&item.title)
        .bind(&item.description)
        .bind(item.price_cents)
        .bind(now)
        .execute(&mut *tx)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("ShopItem", &item.id));
        }

        sqlx::query("DELETE FROM shop_item_categories WHERE shop_item_id = ?1")
            .bind(&item.id)
            .execute(&mut *tx)
            .await?;

        for (position, category_id) in item.category_ids.iter().enumerate() {
            sqlx::query(
                r#"
                INSERT INTO shop_item_categories (shop_item_id, category_id, position)
                VALUES (?1, ?2, ?3)
                "#,
            )
            .bind(&item.id)
            .bind(category_id)
            .bind(position as i64)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;

        Ok(())
    }

    /// Hard-deletes a shop item; its category links cascade with it.
    ///
    /// Order lines referencing this item keep their stored reference; reads
    /// resolve it fail-soft to nothing.
    pub async fn delete(&self, id: &str) -> DbResult<()> {
        debug!(id = %id, "Deleting shop item");

        let result = sqlx::query("DELETE FROM shop_items WHERE id = ?1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found("ShopItem", id));
        }

        Ok(())
    }

    /// Checks whether a shop item exists (for write-time reference checks).
    pub async fn exists(&self, id: &str) -> DbResult<bool> {
        let found: i64 =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM shop_items WHERE id = ?1)")
                .bind(id)
                .fetch_one(&self.pool)
                .await?;

        Ok(found != 0)
    }

    /// Loads the ordered category reference IDs for an item.
    async fn category_ids(&self, item_id: &str) -> DbResult<Vec<String>> {
        let ids: Vec<String> = sqlx::query_scalar(
            r#"
            SELECT category_id
            FROM shop_item_categories
            WHERE shop_item_id = ?1
            ORDER BY position
            "#,
        )
        .bind(item_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
