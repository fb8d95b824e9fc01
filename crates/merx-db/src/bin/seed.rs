//! # Seed Data Generator
//!
//! Populates the database with sample data for development: the original
//! "two customers, two categories, two items, one order" starter set.
//!
//! ## Usage
//! ```bash
//! cargo run -p merx-db --bin seed
//!
//! # Specify database path
//! cargo run -p merx-db --bin seed -- --db ./data/merx.db
//! ```

use chrono::Utc;
use std::env;

use merx_core::{order_total, Category, Customer, Order, OrderLine, PricedLine, ShopItem};
use merx_db::{generate_id, Database, DbConfig};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./merx.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            other => {
                eprintln!("Unknown argument: {other}");
                eprintln!("Usage: seed [--db <path>]");
                std::process::exit(1);
            }
        }
        i += 1;
    }

    println!("Seeding database at {db_path}");

    let db = Database::new(DbConfig::new(&db_path)).await?;
    let now = Utc::now();

    // Customers
    let alice = Customer {
        id: generate_id(),
        name: "Alice".to_string(),
        surname: "Smith".to_string(),
        email: "alice@example.com".to_string(),
        created_at: now,
        updated_at: now,
    };
    let bob = Customer {
        id: generate_id(),
        name: "Bob".to_string(),
        surname: "Brown".to_string(),
        email: "bob@example.com".to_string(),
        created_at: now,
        updated_at: now,
    };
    db.customers().insert(&alice).await?;
    db.customers().insert(&bob).await?;

    // Categories
    let electronics = Category {
        id: generate_id(),
        title: "Electronics".to_string(),
        description: Some("Electronic items".to_string()),
        created_at: now,
        updated_at: now,
    };
    let books = Category {
        id: generate_id(),
        title: "Books".to_string(),
        description: Some("Books and magazines".to_string()),
        created_at: now,
        updated_at: now,
    };
    db.categories().insert(&electronics).await?;
    db.categories().insert(&books).await?;

    // Shop items
    let laptop = ShopItem {
        id: generate_id(),
        title: "Laptop".to_string(),
        description: Some("A fast laptop".to_string()),
        price_cents: 99999,
        category_ids: vec![electronics.id.clone()],
        created_at: now,
        updated_at: now,
    };
    let novel = ShopItem {
        id: generate_id(),
        title: "Novel".to_string(),
        description: Some("A mystery novel".to_string()),
        price_cents: 1999,
        category_ids: vec![books.id.clone()],
        created_at: now,
        updated_at: now,
    };
    db.shop_items().insert(&laptop).await?;
    db.shop_items().insert(&novel).await?;

    // One order for Alice: 1 laptop + 2 novels, total from live prices
    let priced = [
        PricedLine {
            unit_price: laptop.price(),
            quantity: 1,
        },
        PricedLine {
            unit_price: novel.price(),
            quantity: 2,
        },
    ];
    let total = order_total(&priced);

    let order = Order {
        id: generate_id(),
        customer_id: alice.id.clone(),
        total_cents: total.cents(),
        status: Default::default(),
        created_at: now,
        updated_at: now,
    };
    let lines = vec![
        OrderLine {
            id: generate_id(),
            order_id: order.id.clone(),
            shop_item_id: laptop.id.clone(),
            quantity: 1,
            position: 0,
        },
        OrderLine {
            id: generate_id(),
            order_id: order.id.clone(),
            shop_item_id: novel.id.clone(),
            quantity: 2,
            position: 1,
        },
    ];
    db.orders().insert(&order, &lines).await?;

    println!("Seeded 2 customers, 2 categories, 2 items, 1 order (total {total})");

    db.close().await;
    Ok(())
}
