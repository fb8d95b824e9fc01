//! # HTTP Routes
//!
//! Route table for the admin API. All resource routes live under `/api`:
//!
//! ```text
//! GET    /health                  liveness + database reachability
//!
//! GET    /api/customers           list customers
//! POST   /api/customers           create customer
//! GET    /api/customers/{id}      fetch one customer
//! PUT    /api/customers/{id}      update customer
//! DELETE /api/customers/{id}      delete customer
//!
//! (same shape for /api/categories, /api/items, /api/orders)
//! ```
//!
//! Items and orders serialize resolved views on read; customers and
//! categories serialize the stored entity directly.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use tower_http::trace::TraceLayer;

use crate::state::AppState;

pub mod categories;
pub mod customers;
pub mod items;
pub mod orders;

/// Builds the full application router.
///
/// Integration tests call this directly and drive it with `tower::oneshot`;
/// `main` serves it over TCP.
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .nest("/customers", customers::router())
        .nest("/categories", categories::router())
        .nest("/items", items::router())
        .nest("/orders", orders::router());

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness endpoint. Reports degraded (503) when the database is
/// unreachable so orchestration can restart the process.
async fn health(State(state): State<AppState>) -> impl IntoResponse {
    if state.db.health_check().await {
        (StatusCode::OK, Json(json!({ "status": "ok" })))
    } else {
        (
            StatusCode::SERVICE_UNAVAILABLE,
            Json(json!({ "status": "degraded" })),
        )
    }
}
