//! # Relational Resolver
//!
//! Expands stored foreign-key references into embedded representations for
//! read responses.
//!
//! ## Resolution Depth
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                       What Gets Expanded                                │
//! │                                                                         │
//! │  ShopItem ──► ShopItemView                                             │
//! │     category_ids: [id, id]  ──►  categories: [Category, Category]      │
//! │                                                                         │
//! │  Order ──► OrderView                                (two levels deep)  │
//! │     customer_id             ──►  customer: Customer                    │
//! │     lines[].shop_item_id    ──►  lines[].shop_item: ShopItemView       │
//! │                                       └── categories: [Category, ...]  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Fail-Soft Reads
//! A referent deleted since the reference was stored never fails the
//! response: single references resolve to `None`, missing categories are
//! omitted from the list. Write-time validation is the handlers' job;
//! the resolver only reports what currently exists.

use tracing::debug;

use crate::error::DbResult;
use crate::pool::Database;
use merx_core::{Order, OrderLineView, OrderView, ShopItem, ShopItemView};

/// Resolver over the store's current snapshot.
///
/// Stateless: every call reads live data through the repositories, so a
/// price or title change is visible in the very next response.
#[derive(Debug, Clone)]
pub struct Resolver {
    db: Database,
}

impl Resolver {
    /// Creates a resolver over the given database handle.
    pub fn new(db: Database) -> Self {
        Resolver { db }
    }

    /// Expands a shop item's category references.
    ///
    /// Categories that no longer exist are omitted; an item with no
    /// categories yields an empty list, never null.
    pub async fn shop_item_view(&self, item: &ShopItem) -> DbResult<ShopItemView> {
        let mut categories = Vec::with_capacity(item.category_ids.len());

        for category_id in &item.category_ids {
            match self.db.categories().get_by_id(category_id).await? {
                Some(category) => categories.push(category),
                None => {
                    debug!(
                        shop_item_id = %item.id,
                        category_id = %category_id,
                        "Category reference no longer resolves; omitting"
                    );
                }
            }
        }

        Ok(ShopItemView {
            id: item.id.clone(),
            title: item.title.clone(),
            description: item.description.clone(),
            price_cents: item.price_cents,
            categories,
            created_at: item.created_at,
            updated_at: item.updated_at,
        })
    }

    /// Fetches and expands a shop item by ID.
    ///
    /// ## Returns
    /// * `Ok(None)` - the item itself no longer exists
    pub async fn resolve_shop_item(&self, id: &str) -> DbResult<Option<ShopItemView>> {
        match self.db.shop_items().get_by_id(id).await? {
            Some(item) => Ok(Some(self.shop_item_view(&item).await?)),
            None => Ok(None),
        }
    }

    /// Expands an order: customer, lines, and each line's shop item with
    /// its categories (two levels of nesting).
    pub async fn order_view(&self, order: &Order) -> DbResult<OrderView> {
        let customer = self.db.customers().get_by_id(&order.customer_id).await?;
        if customer.is_none() {
            debug!(
                order_id = %order.id,
                customer_id = %order.customer_id,
                "Customer reference no longer resolves"
            );
        }

        let stored_lines = self.db.orders().get_lines(&order.id).await?;
        let mut lines = Vec::with_capacity(stored_lines.len());

        for line in &stored_lines {
            let shop_item = self.resolve_shop_item(&line.shop_item_id).await?;
            if shop_item.is_none() {
                debug!(
                    order_id = %order.id,
                    shop_item_id = %line.shop_item_id,
                    "Shop item reference no longer resolves"
                );
            }
            lines.push(OrderLineView {
                shop_item,
                quantity: line.quantity,
            });
        }

        Ok(OrderView {
            id: order.id.clone(),
            customer,
            lines,
            total_cents: order.total_cents,
            status: order.status,
            created_at: order.created_at,
            updated_at: order.updated_at,
        })
    }

    /// Fetches and expands an order by ID.
    ///
    /// ## Returns
    /// * `Ok(None)` - the order itself no longer exists
    pub async fn resolve_order(&self, id: &str) -> DbResult<Option<OrderView>> {
        match self.db.orders().get_by_id(id).await? {
            Some(order) => Ok(Some(self.order_view(&order).await?)),
            None => Ok(None),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generate_id;
    use crate::pool::{Database, DbConfig};
    use chrono::Utc;
    use merx_core::{Category, Customer, OrderLine, OrderStatus};

    async fn seed_customer(db: &Database) -> Customer {
        let now = Utc::now();
        let customer = Customer {
            id: generate_id(),
            name: "Alice".to_string(),
            surname: "Smith".to_string(),
            email: format!("{}@example.com", generate_id()),
            created_at: now,
            updated_at: now,
        };
        db.customers().insert(&customer).await.unwrap();
        customer
    }

    async fn seed_category(db: &Database, title: &str) -> Category {
        let now = Utc::now();
        let category = Category {
            id: generate_id(),
            title: title.to_string(),
            description: None,
            created_at: now,
            updated_at: now,
        };
        db.categories().insert(&category).await.unwrap();
        category
    }

    async fn seed_item(db: &Database, price_cents: i64, category_ids: Vec<String>) -> ShopItem {
        let now = Utc::now();
        let item = ShopItem {
            id: generate_id(),
            title: "Novel".to_string(),
            description: None,
            price_cents,
            category_ids,
            created_at: now,
            updated_at: now,
        };
        db.shop_items().insert(&item).await.unwrap();
        item
    }

    async fn seed_order(db: &Database, customer_id: &str, items: &[(&str, i64)]) -> Order {
        let now = Utc::now();
        let order = Order {
            id: generate_id(),
            customer_id: customer_id.to_string(),
            total_cents: 0,
            status: OrderStatus::Pending,
            created_at: now,
            updated_at: now,
        };
        let lines: Vec<OrderLine> = items
            .iter()
            .enumerate()
            .map(|(position, (item_id, qty))| OrderLine {
                id: generate_id(),
                order_id: order.id.clone(),
                shop_item_id: item_id.to_string(),
                quantity: *qty,
                position: position as i64,
            })
            .collect();
        db.orders().insert(&order, &lines).await.unwrap();
        order
    }

    #[tokio::test]
    async fn test_shop_item_view_embeds_categories() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let c1 = seed_category(&db, "Books").await;
        let c2 = seed_category(&db, "Mystery").await;
        let item = seed_item(&db, 1999, vec![c1.id.clone(), c2.id.clone()]).await;

        let view = db.resolver().shop_item_view(&item).await.unwrap();
        assert_eq!(view.categories.len(), 2);
        assert_eq!(view.categories[0].title, "Books");
        assert_eq!(view.categories[1].title, "Mystery");
    }

    #[tokio::test]
    async fn test_empty_category_list_stays_empty_not_null() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let item = seed_item(&db, 1999, vec![]).await;

        let view = db.resolver().shop_item_view(&item).await.unwrap();
        assert!(view.categories.is_empty());

        let json = serde_json::to_value(&view).unwrap();
        assert!(json["categories"].is_array());
    }

    #[tokio::test]
    async fn test_deleted_category_is_omitted_fail_soft() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let c1 = seed_category(&db, "Books").await;
        let c2 = seed_category(&db, "Mystery").await;
        let item = seed_item(&db, 1999, vec![c1.id.clone(), c2.id.clone()]).await;

        db.categories().delete(&c1.id).await.unwrap();

        let view = db.resolver().shop_item_view(&item).await.unwrap();
        assert_eq!(view.categories.len(), 1);
        assert_eq!(view.categories[0].title, "Mystery");
    }

    #[tokio::test]
    async fn test_order_view_resolves_two_levels() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let customer = seed_customer(&db).await;
        let category = seed_category(&db, "Electronics").await;
        let item = seed_item(&db, 99999, vec![category.id.clone()]).await;
        let order = seed_order(&db, &customer.id, &[(&item.id, 2)]).await;

        let view = db.resolver().order_view(&order).await.unwrap();

        let resolved_customer = view.customer.unwrap();
        assert_eq!(resolved_customer.id, customer.id);

        assert_eq!(view.lines.len(), 1);
        let line = &view.lines[0];
        assert_eq!(line.quantity, 2);

        let shop_item = line.shop_item.as_ref().unwrap();
        assert_eq!(shop_item.id, item.id);
        assert_eq!(shop_item.categories.len(), 1);
        assert_eq!(shop_item.categories[0].title, "Electronics");
    }

    #[tokio::test]
    async fn test_deleted_referents_resolve_to_none_fail_soft() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let customer = seed_customer(&db).await;
        let item = seed_item(&db, 1000, vec![]).await;
        let order = seed_order(&db, &customer.id, &[(&item.id, 1)]).await;

        db.customers().delete(&customer.id).await.unwrap();
        db.shop_items().delete(&item.id).await.unwrap();

        // Read still succeeds; missing referents are just absent
        let view = db.resolver().order_view(&order).await.unwrap();
        assert!(view.customer.is_none());
        assert_eq!(view.lines.len(), 1);
        assert!(view.lines[0].shop_item.is_none());
        assert_eq!(view.lines[0].quantity, 1);
    }

    #[tokio::test]
    async fn test_resolve_order_missing_is_none() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert!(db.resolver().resolve_order("no-such-id").await.unwrap().is_none());
    }
}
