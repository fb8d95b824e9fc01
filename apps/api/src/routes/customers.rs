//! Customer CRUD handlers.
//!
//! Customers hold no references to other entities, so this is the plainest
//! of the resource routes: validate fields, hit the repository, serialize
//! the stored entity. Email uniqueness is enforced by the database and
//! surfaces as a 400.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use merx_core::validation::{validate_email, validate_required_text};
use merx_core::Customer;
use merx_db::{generate_id, DbError};

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
pub struct CreateCustomer {
    pub name: String,
    pub surname: String,
    pub email: String,
}

/// Partial update: absent fields keep their stored value.
#[derive(Debug, Deserialize, Default)]
pub struct UpdateCustomer {
    pub name: Option<String>,
    pub surname: Option<String>,
    pub email: Option<String>,
}

// =============================================================================
// Handlers
// =============================================================================

async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Customer>>> {
    let customers = state.db.customers().list().await?;
    Ok(Json(customers))
}

async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Customer>> {
    let customer = state
        .db
        .customers()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| DbError::not_found("Customer", &id))?;

    Ok(Json(customer))
}

async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateCustomer>,
) -> ApiResult<(StatusCode, Json<Customer>)> {
    let now = Utc::now();
    let customer = Customer {
        id: generate_id(),
        name: validate_required_text("name", &body.name)?,
        surname: validate_required_text("surname", &body.surname)?,
        email: validate_email(&body.email)?,
        created_at: now,
        updated_at: now,
    };

    state.db.customers().insert(&customer).await?;
    info!(id = %customer.id, "Customer created");

    Ok((StatusCode::CREATED, Json(customer)))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateCustomer>,
) -> ApiResult<Json<Customer>> {
    let repo = state.db.customers();

    let mut customer = repo
        .get_by_id(&id)
        .await?
        .ok_or_else(|| DbError::not_found("Customer", &id))?;

    if let Some(name) = &body.name {
        customer.name = validate_required_text("name", name)?;
    }
    if let Some(surname) = &body.surname {
        customer.surname = validate_required_text("surname", surname)?;
    }
    if let Some(email) = &body.email {
        customer.email = validate_email(email)?;
    }

    repo.update(&customer).await?;

    // Re-read so the response carries the store's updated_at
    let customer = repo
        .get_by_id(&id)
        .await?
        .ok_or_else(|| DbError::not_found("Customer", &id))?;

    Ok(Json(customer))
}

async fn delete_one(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    state.db.customers().delete(&id).await?;
    info!(id = %id, "Customer deleted");

    Ok(StatusCode::NO_CONTENT)
}
