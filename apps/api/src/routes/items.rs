//! Shop item CRUD handlers.
//!
//! Writes verify every referenced category exists and reject the whole
//! request otherwise. Reads go through the resolver, so responses embed
//! the full current categories; a category deleted since being referenced
//! is omitted from the list rather than failing the read.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Deserialize;
use tracing::info;

use merx_core::validation::{
    validate_optional_text, validate_price_cents, validate_required_text,
};
use merx_core::{ShopItem, ShopItemView, ValidationError};
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
pub struct CreateShopItem {
    pub title: String,
    pub description: Option<String>,
    pub price_cents: i64,
    /// Category references. Absent means no categories.
    #[serde(default)]
    pub category_ids: Vec<String>,
}

/// Partial update: absent fields keep their stored value. When
/// `category_ids` is present it replaces the whole reference list.
#[derive(Debug, Deserialize, Default)]
pub struct UpdateShopItem {
    pub title: Option<String>,
    pub description: Option<String>,
    pub price_cents: Option<i64>,
    pub category_ids: Option<Vec<String>>,
}

// =============================================================================
// Reference Checks
// =============================================================================

/// Fails the write if any referenced category does not currently exist.
async fn check_categories(db: &Database, category_ids: &[String]) -> ApiResult<()> {
    let repo = db.categories();
    for id in category_ids {
        if !repo.exists(id).await? {
            return Err(ValidationError::unresolved("Category", id).into());
        }
    }
    Ok(())
}

// =============================================================================
// Handlers
// =============================================================================

async fn list(State(state): State<AppState>) -> ApiResult<Json<Vec<ShopItemView>>> {
    let resolver = state.db.resolver();
    let items = state.db.shop_items().list().await?;

    let mut views = Vec::with_capacity(items.len());
    for item in &items {
        views.push(resolver.shop_item_view(item).await?);
    }

    Ok(Json(views))
}

async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ShopItemView>> {
    let view = state
        .db
        .resolver()
        .resolve_shop_item(&id)
        .await?
        .ok_or_else(|| DbError::not_found("ShopItem", &id))?;

    Ok(Json(view))
}

async fn create(
    State(state): State<AppState>,
    Json(body): Json<CreateShopItem>,
) -> ApiResult<(StatusCode, Json<ShopItemView>)> {
    validate_price_cents(body.price_cents)?;
    check_categories(&state.db, &body.category_ids).await?;

    let now = Utc::now();
    let item = ShopItem {
        id: generate_id(),
        title: validate_required_text("title", &body.title)?,
        description: validate_optional_text("description", body.description.as_deref())?,
        price_cents: body.price_cents,
        category_ids: body.category_ids,
        created_at: now,
        updated_at: now,
    };

    state.db.shop_items().insert(&item).await?;
    info!(id = %item.id, price_cents = item.price_cents, "Shop item created");

    let view = state.db.resolver().shop_item_view(&item).await?;
    Ok((StatusCode::CREATED, Json(view)))
}

async fn update(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateShopItem>,
) -> ApiResult<Json<ShopItemView>> {
    let repo = state.db.shop_items();

    let mut item = repo
        .get_by_id(&id)
        .await?
        .ok_or_else(|| DbError::not_found("ShopItem", &id))?;

    if let Some(title) = &body.title {
        item.title = validate_required_text("title", title)?;
    }
    if let Some(description) = &body.description {
        let validated = validate_optional_text("description", Some(description))?;
        item.description = validated.filter(|d| !d.is_empty());
    }
    if let Some(price_cents) = body.price_cents {
        validate_price_cents(price_cents)?;
        item.price_cents = price_cents;
    }
    if let Some(category_ids) = body.category_ids {
        check_categories(&state.db, &category_ids).await?;
        item.category_ids = category_ids;
    }

    repo.update(&item).await?;

    let view = state
        .db
        .resolver()
        .resolve_shop_item(&id)
        .await?
        .ok_or_else(|| DbError::not_found("ShopItem", &id))?;

    Ok(Json(view))
}

async fn delete_one(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<StatusCode> {
    state.db.shop_items().delete(&id).await?;
    info!(id = %id, "Shop item deleted");

    Ok(StatusCode::NO_CONTENT)
}
