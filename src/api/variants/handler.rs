//! Variant API handlers

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::Deserialize;

use crate::core::ServerState;
use crate::db::models::{Variant, VariantCreate, VariantUpdate};
use crate::generation::{GenerateRequest, GenerationPreview, GenerationReport};
use crate::utils::{ApiResponse, AppResult, ok, ok_with_message, validation};

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub include_inactive: bool,
}

#[derive(Debug, Deserialize)]
pub struct PreviewQuery {
    /// Target item id
    pub item: String,
    /// One-off base price override
    pub base_price: Option<f64>,
}

/// GET /api/items/{id}/variants - variants of one item
pub async fn list_for_item(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Query(query): Query<ListQuery>,
) -> AppResult<Json<ApiResponse<Vec<Variant>>>> {
    let variants = state
        .manager
        .list_variants(&id, query.include_inactive)
        .await?;
    Ok(ok(variants))
}

/// GET /api/variants/preview?item=...&base_price=... - priced combinations,
/// nothing persisted
pub async fn preview(
    State(state): State<ServerState>,
    Query(query): Query<PreviewQuery>,
) -> AppResult<Json<ApiResponse<GenerationPreview>>> {
    let preview = state
        .manager
        .preview(&query.item, query.base_price)
        .await?;
    Ok(ok(preview))
}

/// POST /api/variants/generate - run the generation workflow
pub async fn generate(
    State(state): State<ServerState>,
    Json(payload): Json<GenerateRequest>,
) -> AppResult<Json<ApiResponse<GenerationReport>>> {
    let report = state.manager.generate(payload).await?;
    let message = format!(
        "Generated {} variants ({} already existed)",
        report.created, report.existing
    );
    Ok(ok_with_message(report, message))
}

/// GET /api/variants/{id} - fetch one variant
pub async fn get_by_id(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<Variant>>> {
    let variant = state.manager.get_variant(&id).await?;
    Ok(ok(variant))
}

/// POST /api/items/{id}/variants - manually create one variant
pub async fn create(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<VariantCreate>,
) -> AppResult<Json<ApiResponse<Variant>>> {
    validation::check(&payload)?;

    let variant = state.manager.create_variant(&id, payload).await?;
    Ok(ok(variant))
}

/// PUT /api/variants/{id} - partial update
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<String>,
    Json(payload): Json<VariantUpdate>,
) -> AppResult<Json<ApiResponse<Variant>>> {
    validation::check(&payload)?;

    let variant = state.manager.update_variant(&id, payload).await?;
    Ok(ok(variant))
}

/// DELETE /api/variants/{id} - delete one variant
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<String>,
) -> AppResult<Json<ApiResponse<bool>>> {
    state.manager.delete_variant(&id).await?;
    Ok(ok_with_message(true, "Variant deleted"))
}
