//! Catalog item API handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::{CatalogItem, CatalogItemCreate, CatalogItemUpdate};
use crate::db::repository::CatalogItemRepository;
use crate::utils::{ApiResponse, AppError, AppResult, ErrorCode, ok, ok_with_message, validation};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub include_inactive: bool,
}

/// GET /api/items - list catalog items, newest first
pub async fn list(
    State(state): State<ServerState>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ApiResponse<Vec<CatalogItem>>>> {
    let repo = CatalogItemRepository::new(state.db.clone());
    let items = repo.find_all(query.include_inactive).await?;
    Ok(ok(items))
}

/// GET /api/items/{id} - fetch one item
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<CatalogItem>>> {
    let repo = CatalogItemRepository::new(state.db.clone());
    let item = repo
        .find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ItemNotFound))?;
    Ok(ok(item))
}

/// POST /api/items - create an item
pub async fn create(
    State(state): State<ServerState>,
    Json(payload): Json<CatalogItemCreate>,
) -> AppResult<Json<ApiResponse<CatalogItem>>> {
    validation::check(&payload)?;

    let repo = CatalogItemRepository::new(state.db.clone());
    let item = repo.create(payload).await?;
    Ok(ok(item))
}

/// PUT /api/items/{id} - partial update
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<CatalogItemUpdate>,
) -> AppResult<Json<ApiResponse<CatalogItem>>> {
    validation::check(&payload)?;

    let repo = CatalogItemRepository::new(state.db.clone());
    repo.find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ItemNotFound))?;
    let item = repo.update(&id, payload).await?;
    Ok(ok(item))
}

/// DELETE /api/items/{id} - delete the item together with its attributes,
/// attribute values and variants
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<bool>>> {
    let repo = CatalogItemRepository::new(state.db.clone());
    repo.find_by_id(&id)
        .await?
        .ok_or_else(|| AppError::new(ErrorCode::ItemNotFound))?;
    repo.delete_cascading(&id).await?;
    Ok(ok_with_message(true, "Item deleted"))
}
