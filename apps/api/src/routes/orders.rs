//! Order handlers - the heart of the API.
//!
//! ## Total Computation
//! An order's total is derived state, recomputed here at the call site
//! whenever the line list is (re)written:
//!
//! ```text
//! request lines ──► fetch each shop item (live price) ──► PricedLine
//!                                                            │
//!                               order_total(&priced) ◄───────┘
//! ```
//!
//! A status-only or customer-only update never touches the lines, so the
//! stored total is kept as-is even if item prices changed in the meantime.
//!
//! ## Reference Rules
//! Writes are strict: a request referencing a customer or shop item that
//! does not currently exist is rejected whole, nothing partial persists.
//! Reads are fail-soft: referents deleted after the fact resolve to null.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use merx_core::validation::{validate_line_count, validate_quantity};
use merx_core::{order_total, Order, OrderLine, OrderStatus, OrderView, PricedLine, ValidationError};
use merx_db::{generate_id, Database, DbError};

use crate::error::ApiResult;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(get_one).put(update).delete(delete_one))
}

// =============================================================================
// Request Bodies
// =============================================================================

#[derive(Debug, Deserialize)]
pub struct LineInput {
    pub shop_item_id: String,
    pub quantity: i64,
}

#[derive(Debug, Deserialize)]
pub struct CreateOrder {
    pub customer_id: String,
    /// May be empty; the total is then zero.
    #[serde(default)]
    pub lines: Vec<LineInput>,
    /// Defaults to pending.
    pub status: Option<OrderStatus>,
}

/// Partial update: absent fields keep their stored value. When `lines` is
/// present it atomically replaces the whole line list and the total is
/// recomputed from live prices; when absent, lines and total are untouched.
#[derive(Debug, Deserialize, Default)]
pub struct UpdateOrder {
    pub customer_id: Option<String>,
    pub lines: Option<Vec<LineInput>>,
    pub status: Option<OrderStatus>,
}

// =============================================================================
// Line Pricing
// =============================================================================

/// Validates the requested lines and prices them against the store.
///
/// Each line's shop item must exist right now; its current price becomes
/// the line's unit price. Returns the rows to persist alongside the priced
/// form the total is computed from.
async fn price_lines(
    db: &Database,
    order_id: &str,
    inputs: &[LineInput],
) -> ApiResult<(Vec<OrderLine>, Vec<PricedLine>)> {
    validate_line_count(inputs.len())?;

    let items = db.shop_items();
    let mut rows = Vec::with_capacity(inputs.len());
    let mut priced = Vec::with_capacity(inputs.len());

    for (position, input) in inputs.iter().enumerate() {
        validate_quantity(input.quantity)?;

        let item = items
            .get_by_id(&input.shop_item_id)
            .await?
            .ok_or_else(|| ValidationError::unresolved("ShopItem", &input.shop_item_id))?;

        rows.push(OrderLine {
            id: generate_id(),
            order_id: order_id.to_string(),
            shop_item_id: input.shop_item_id.clone(),
            quantity: input.quantity,
            position: position as i64,
        });
        priced.push(PricedLine {
            unit_price: item.price(),
            quantity: input.quantity,
        });
    }

    Ok((rows, priced))
}

async fn check_customer(db: &Database, id: &str) -> ApiResult<()> {
    if !db.customers().exists(id).await? {
        return Err(ValidationError::unresolved("Customer", id).into());
    }
    Ok(())
}

// =============================================================================
// Handlers
// =============================================================================

async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<OrderView>>> {
    let resolver = state.db.resolver();
    let orders = state.db.orders().list().await?;

    let mut views = Vec::with_capacity(orders.len());
    for order in &orders {
        views.push(resolver.order_view(order).await?);
    }

    Ok(Json(views))
}

async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<OrderView>> {
    let view = state
        .db
        .resolver()
        .resolve_order(&id)
        .await?
        .ok_or_else(|| DbError::not_found("Order", &id))?;

    Ok(Json(view))
}

async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateOrder>,
) -> ApiResult<(StatusCode, Json<OrderView>)> {
    check_customer(&state.db, &body.customer_id).await?;

    let order_id = generate_id();
    let (lines, priced) = price_lines(&state.db, &order_id, &body.lines).await?;

    let now = Utc::now();
    let order = Order {
        id: order_id,
        customer_id: body.customer_id,
        total_cents: order_total(&priced).cents(),
        status: body.status.unwrap_or(OrderStatus::Pending),
        created_at: now,
        updated_at: now,
    };

    state.db.orders().insert(&order, &lines).await?;
    info!(
        id = %order.id,
        lines = lines.len(),
        total_cents = order.total_cents,
        "Order created"
    );

    let view = state.db.resolver().order_view(&order).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateOrder>,
) -> ApiResult<Json<OrderView>> {
    let repo = state.db.orders();

    let mut order = repo
        .get_by_id(&id)
        .await?
        .ok_or_else(|| DbError::not_found("Order", &id))?;

    if let Some(customer_id) = body.customer_id {
        check_customer(&state.db, &customer_id).await?;
        order.customer_id = customer_id;
    }
    if let Some(status) = body.status {
        order.status = status;
    }

    // A new line list replaces the old one wholesale and re-derives the
    // total from live prices. Without one, the stored total stands.
    let new_lines = match &body.lines {
        Some(inputs) => {
            let (lines, priced) = price_lines(&state.db, &id, inputs).await?;
            order.total_cents = order_total(&priced).cents();
            Some(lines)
        }
        None => None,
    };

    repo.update(&order, new_lines.as_deref()).await?;
    info!(
        id = %order.id,
        replaced_lines = new_lines.is_some(),
        total_cents = order.total_cents,
        "Order updated"
    );

    let view = state
        .db
        .resolver()
        .resolve_order(&id)
        .await?
        .ok_or_else(|| DbError::not_found("Order", &id))?;

    Ok(Json(view))
}

async fn delete_one(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    state.db.orders().delete(&id).await?;
    info!(id = %id, "Order deleted");

    Ok(StatusCode::NO_CONTENT)
}
