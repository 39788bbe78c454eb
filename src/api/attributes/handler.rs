//! Attribute API handlers

use axum::{
    Json,
    extract::{Path, State},
};

use crate::core::ServerState;
use crate::db::models::{AttributeCreate, AttributeReorder, AttributeUpdate, AttributeWithValues};
use crate::utils::{ApiResponse, AppResult, ok, ok_with_message, validation};

/// GET /api/items/{id}/attributes - ordered attributes with nested values
pub async fn list_for_item(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Vec<AttributeWithValues>>>> {
    let attributes = state.manager.list_attributes(&id).await?;
    Ok(ok(attributes))
}

/// GET /api/attributes/{id} - one attribute with its values
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<AttributeWithValues>>> {
    let attribute = state.manager.get_attribute(&id).await?;
    Ok(ok(attribute))
}

/// POST /api/items/{id}/attributes - add an attribute with its value list
pub async fn create(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<AttributeCreate>,
) -> AppResult<Json<ApiResponse<AttributeWithValues>>> {
    validation::check(&payload)?;

    let attribute = state.manager.add_attribute(&id, payload).await?;
    Ok(ok(attribute))
}

/// PUT /api/items/{id}/attributes/reorder - permute attribute positions
pub async fn reorder(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<AttributeReorder>,
) -> AppResult<Json<ApiResponse<Vec<AttributeWithValues>>>> {
    state.manager.reorder_attributes(&id, payload).await?;
    let attributes = state.manager.list_attributes(&id).await?;
    Ok(ok_with_message(attributes, "Attributes reordered"))
}

/// PUT /api/attributes/{id} - update fields; a supplied value list replaces
/// the existing one
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<AttributeUpdate>,
) -> AppResult<Json<ApiResponse<AttributeWithValues>>> {
    validation::check(&payload)?;

    let attribute = state.manager.update_attribute(&id, payload).await?;
    Ok(ok(attribute))
}

/// DELETE /api/attributes/{id} - delete with cascade to values and the
/// owning item's variants
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<bool>>> {
    state.manager.delete_attribute(&id).await?;
    Ok(ok_with_message(true, "Attribute deleted"))
}
