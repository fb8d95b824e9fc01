//! Category CRUD handlers.
//!
//! Deleting a category never touches the shop items that reference it;
//! their stored reference goes dangling and reads simply omit it.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use merx_core::validation::{validate_optional_text, validate_required_text};
use merx_core::Category;
use merx_db::{generate_id, DbError};

use crate::error::ApiResult;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list).post(create))
        .route("/{id}", get(get_one).put(update).delete(delete_one))
}

#[derive(Debug, Deserialize)]
pub struct CreateCategory {
    pub title: String,
    pub description: Option<String>,
}

/// Partial update: absent fields keep their stored value. A `description`
/// set to an empty string clears it.
#[derive(Debug, Deserialize, Default)]
pub struct UpdateCategory {
    pub title: Option<String>,
    pub description: Option<String>,
}

async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<Category>>> {
    let categories = state.db.categories().list().await?;
    Ok(Json(categories))
}

async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Category>> {
    let category = state
        .db
        .categories()
        .get_by_id(&id)
        .await?
        .ok_or_else(|| DbError::not_found("Category", &id))?;

    Ok(Json(category))
}

async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateCategory>,
) -> ApiResult<(StatusCode, Json<Category>)> {
    let now = Utc::now();
    let category = Category {
        id: generate_id(),
        title: validate_required_text("title", &body.title)?,
        description: validate_optional_text("description", body.description.as_deref())?,
        created_at: now,
        updated_at: now,
    };

    state.db.categories().insert(&category).await?;
    info!(id = %category.id, "Category created");

    Ok((StatusCode::CREATED, Json(category)))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateCategory>,
) -> ApiResult<Json<Category>> {
    let repo = state.db.categories();

    let mut category = repo
        .get_by_id(&id)
        .await?
        .ok_or_else(|| DbError::not_found("Category", &id))?;

    if let Some(title) = &body.title {
        category.title = validate_required_text("title", title)?;
    }
    if let Some(description) = &body.description {
        let validated = validate_optional_text("description", Some(description))?;
        category.description = validated.filter(|d| !d.is_empty());
    }

    repo.update(&category).await?;

    let category = repo
        .get_by_id(&id)
        .await?
        .ok_or_else(|| DbError::not_found("Category", &id))?;

    Ok(Json(category))
}

async fn delete_one(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    state.db.categories().delete(&id).await?;
    info!(id = %id, "Category deleted");

    Ok(StatusCode::NO_CONTENT)
}
