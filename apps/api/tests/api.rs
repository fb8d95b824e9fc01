//! End-to-end API tests.
//!
//! Each test builds the production router over a fresh in-memory database
//! and drives it with `tower::oneshot` - no sockets, fully isolated.

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use merx_api::{router, AppState};
use merx_db::{Database, DbConfig};

// =============================================================================
// Harness
// =============================================================================

async fn app() -> Router {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    router(AppState::new(db))
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(payload) => Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(payload.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    (status, json)
}

async fn create_customer(app: &Router, email: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/customers",
        Some(json!({ "name": "Alice", "surname": "Smith", "email": email })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

async fn create_category(app: &Router, title: &str) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/categories",
        Some(json!({ "title": title })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

async fn create_item(app: &Router, title: &str, price_cents: i64, category_ids: &[&str]) -> String {
    let (status, body) = send(
        app,
        "POST",
        "/api/items",
        Some(json!({
            "title": title,
            "price_cents": price_cents,
            "category_ids": category_ids,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body["id"].as_str().unwrap().to_string()
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn health_reports_ok() {
    let app = app().await;
    let (status, body) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

// =============================================================================
// Customers
// =============================================================================

#[tokio::test]
async fn customer_crud_lifecycle() {
    let app = app().await;

    let id = create_customer(&app, "alice@example.com").await;

    let (status, body) = send(&app, "GET", &format!("/api/customers/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["email"], "alice@example.com");

    // Partial update: only the name changes
    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/customers/{id}"),
        Some(json!({ "name": "Alicia" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Alicia");
    assert_eq!(body["surname"], "Smith");
    assert_eq!(body["email"], "alice@example.com");

    let (status, body) = send(&app, "GET", "/api/customers", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body.as_array().unwrap().len(), 1);

    let (status, _) = send(&app, "DELETE", &format!("/api/customers/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", &format!("/api/customers/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn customer_email_is_normalized_and_unique() {
    let app = app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/customers",
        Some(json!({ "name": "Bob", "surname": "Brown", "email": "Bob@Example.COM" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["email"], "bob@example.com");

    // Same address in a different case collides
    let (status, _) = send(
        &app,
        "POST",
        "/api/customers",
        Some(json!({ "name": "Bob", "surname": "Brown", "email": "bob@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn customer_rejects_bad_input() {
    let app = app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/customers",
        Some(json!({ "name": "", "surname": "Smith", "email": "a@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "name is required");

    let (status, _) = send(
        &app,
        "POST",
        "/api/customers",
        Some(json!({ "name": "A", "surname": "B", "email": "not-an-email" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Categories
// =============================================================================

#[tokio::test]
async fn category_crud_lifecycle() {
    let app = app().await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/categories",
        Some(json!({ "title": "Electronics", "description": "Gadgets" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = body["id"].as_str().unwrap().to_string();
    assert_eq!(body["description"], "Gadgets");

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/categories/{id}"),
        Some(json!({ "title": "Gadgets & Gizmos" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "Gadgets & Gizmos");
    assert_eq!(body["description"], "Gadgets");

    let (status, _) = send(&app, "DELETE", &format!("/api/categories/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "DELETE", &format!("/api/categories/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Shop Items
// =============================================================================

#[tokio::test]
async fn item_embeds_resolved_categories() {
    let app = app().await;

    let cat_a = create_category(&app, "Electronics").await;
    let cat_b = create_category(&app, "Office").await;
    let item = create_item(&app, "Laptop", 99999, &[&cat_a, &cat_b]).await;

    let (status, body) = send(&app, "GET", &format!("/api/items/{item}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let categories = body["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 2);
    assert_eq!(categories[0]["title"], "Electronics");
    assert_eq!(categories[1]["title"], "Office");
}

#[tokio::test]
async fn item_without_categories_has_empty_list() {
    let app = app().await;

    let item = create_item(&app, "Pencil", 99, &[]).await;

    let (_, body) = send(&app, "GET", &format!("/api/items/{item}"), None).await;
    assert_eq!(body["categories"], json!([]));
}

#[tokio::test]
async fn item_rejects_unknown_category_and_negative_price() {
    let app = app().await;

    let (status, _) = send(
        &app,
        "POST",
        "/api/items",
        Some(json!({
            "title": "Laptop",
            "price_cents": 1000,
            "category_ids": ["no-such-category"],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        "POST",
        "/api/items",
        Some(json!({ "title": "Laptop", "price_cents": -1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // A price past the cap is rejected too, so no combination of accepted
    // price and quantity can overflow a derived total
    let (status, _) = send(
        &app,
        "POST",
        "/api/items",
        Some(json!({ "title": "Laptop", "price_cents": merx_core::MAX_PRICE_CENTS + 1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn item_deleted_category_is_omitted_from_view() {
    let app = app().await;

    let cat_a = create_category(&app, "Electronics").await;
    let cat_b = create_category(&app, "Office").await;
    let item = create_item(&app, "Laptop", 99999, &[&cat_a, &cat_b]).await;

    let (status, _) = send(&app, "DELETE", &format!("/api/categories/{cat_a}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // The item still reads fine; the dangling reference just vanishes
    let (status, body) = send(&app, "GET", &format!("/api/items/{item}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let categories = body["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0]["title"], "Office");
}

#[tokio::test]
async fn item_update_replaces_category_list() {
    let app = app().await;

    let cat_a = create_category(&app, "Electronics").await;
    let cat_b = create_category(&app, "Office").await;
    let item = create_item(&app, "Laptop", 99999, &[&cat_a]).await;

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/items/{item}"),
        Some(json!({ "category_ids": [cat_b] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let categories = body["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 1);
    assert_eq!(categories[0]["title"], "Office");
}

// =============================================================================
// Orders
// =============================================================================

#[tokio::test]
async fn order_total_derives_from_live_prices() {
    let app = app().await;

    let customer = create_customer(&app, "alice@example.com").await;
    let item_a = create_item(&app, "Widget", 1000, &[]).await;
    let item_b = create_item(&app, "Gizmo", 550, &[]).await;

    // 2 x $10.00 + 1 x $5.50 = $25.50
    let (status, body) = send(
        &app,
        "POST",
        "/api/orders",
        Some(json!({
            "customer_id": customer,
            "lines": [
                { "shop_item_id": item_a, "quantity": 2 },
                { "shop_item_id": item_b, "quantity": 1 },
            ],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["total_cents"], 2550);
    assert_eq!(body["status"], "pending");

    // Lines come back resolved two levels deep, in submission order
    let lines = body["lines"].as_array().unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0]["quantity"], 2);
    assert_eq!(lines[0]["shop_item"]["title"], "Widget");
    assert_eq!(lines[1]["shop_item"]["price_cents"], 550);
    assert_eq!(body["customer"]["email"], "alice@example.com");
}

#[tokio::test]
async fn order_with_no_lines_totals_zero() {
    let app = app().await;

    let customer = create_customer(&app, "alice@example.com").await;

    let (status, body) = send(
        &app,
        "POST",
        "/api/orders",
        Some(json!({ "customer_id": customer, "lines": [] })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["total_cents"], 0);
    assert_eq!(body["lines"], json!([]));
}

#[tokio::test]
async fn order_rejects_dangling_references_and_bad_quantity() {
    let app = app().await;

    let customer = create_customer(&app, "alice@example.com").await;
    let item = create_item(&app, "Widget", 1000, &[]).await;

    // Unknown customer
    let (status, _) = send(
        &app,
        "POST",
        "/api/orders",
        Some(json!({
            "customer_id": "no-such-customer",
            "lines": [{ "shop_item_id": item, "quantity": 1 }],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Unknown shop item
    let (status, _) = send(
        &app,
        "POST",
        "/api/orders",
        Some(json!({
            "customer_id": customer,
            "lines": [{ "shop_item_id": "no-such-item", "quantity": 1 }],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Zero quantity
    let (status, _) = send(
        &app,
        "POST",
        "/api/orders",
        Some(json!({
            "customer_id": customer,
            "lines": [{ "shop_item_id": item, "quantity": 0 }],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Nothing partial was persisted along the way
    let (_, body) = send(&app, "GET", "/api/orders", None).await;
    assert_eq!(body.as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn order_update_reprices_lines_but_not_status_changes() {
    let app = app().await;

    let customer = create_customer(&app, "alice@example.com").await;
    let item_a = create_item(&app, "Widget", 1000, &[]).await;
    let item_b = create_item(&app, "Gizmo", 550, &[]).await;

    let (_, body) = send(
        &app,
        "POST",
        "/api/orders",
        Some(json!({
            "customer_id": customer,
            "lines": [
                { "shop_item_id": item_a, "quantity": 2 },
                { "shop_item_id": item_b, "quantity": 1 },
            ],
        })),
    )
    .await;
    let order = body["id"].as_str().unwrap().to_string();
    assert_eq!(body["total_cents"], 2550);

    // Price change alone does not retroactively alter the stored total
    let (status, _) = send(
        &app,
        "PUT",
        &format!("/api/items/{item_a}"),
        Some(json!({ "price_cents": 500 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = send(&app, "GET", &format!("/api/orders/{order}"), None).await;
    assert_eq!(body["total_cents"], 2550);

    // Replacing the lines re-derives the total from current prices
    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/orders/{order}"),
        Some(json!({ "lines": [{ "shop_item_id": item_a, "quantity": 2 }] })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["total_cents"], 1000);
    assert_eq!(body["lines"].as_array().unwrap().len(), 1);

    // A status-only update leaves lines and total untouched
    let (status, body) = send(
        &app,
        "PUT",
        &format!("/api/orders/{order}"),
        Some(json!({ "status": "shipped" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "shipped");
    assert_eq!(body["total_cents"], 1000);
    assert_eq!(body["lines"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn order_reads_fail_soft_on_deleted_referents() {
    let app = app().await;

    let customer = create_customer(&app, "alice@example.com").await;
    let category = create_category(&app, "Electronics").await;
    let item = create_item(&app, "Laptop", 99999, &[&category]).await;

    let (_, body) = send(
        &app,
        "POST",
        "/api/orders",
        Some(json!({
            "customer_id": customer,
            "lines": [{ "shop_item_id": item, "quantity": 1 }],
        })),
    )
    .await;
    let order = body["id"].as_str().unwrap().to_string();

    // Deleting the customer and the shop item leaves the order readable;
    // the vanished referents resolve to null, the total is untouched
    send(&app, "DELETE", &format!("/api/customers/{customer}"), None).await;
    send(&app, "DELETE", &format!("/api/items/{item}"), None).await;

    let (status, body) = send(&app, "GET", &format!("/api/orders/{order}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["customer"], Value::Null);
    assert_eq!(body["total_cents"], 99999);

    let lines = body["lines"].as_array().unwrap();
    assert_eq!(lines.len(), 1);
    assert_eq!(lines[0]["shop_item"], Value::Null);
    assert_eq!(lines[0]["quantity"], 1);
}

#[tokio::test]
async fn order_missing_returns_404_and_delete_cleans_up() {
    let app = app().await;

    let (status, _) = send(&app, "GET", "/api/orders/no-such-order", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let customer = create_customer(&app, "alice@example.com").await;
    let item = create_item(&app, "Widget", 1000, &[]).await;

    let (_, body) = send(
        &app,
        "POST",
        "/api/orders",
        Some(json!({
            "customer_id": customer,
            "lines": [{ "shop_item_id": item, "quantity": 3 }],
        })),
    )
    .await;
    let order = body["id"].as_str().unwrap().to_string();

    let (status, _) = send(&app, "DELETE", &format!("/api/orders/{order}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", &format!("/api/orders/{order}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = send(&app, "GET", "/api/orders", None).await;
    assert_eq!(body.as_array().unwrap().len(), 0);
}
