use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use crate::server::AppState;
use crate::server::dto::ApiJson;
use crate::server::response::{
    ApiError, ApiResponse, StoreOptionExt, StoreResultExt, require_affected,
};
use crate::server::validation::validate_tag_name;
use crate::types::{NewTag, TagUpdate};

pub async fn list_tags(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let tags = state
        .store
        .list_tags_detailed()
        .api_err("Failed to list tags")?;

    Ok::<_, ApiError>(Json(ApiResponse::success(tags)))
}

pub async fn get_tag(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    let tag = state
        .store
        .get_tag_detailed(id)
        .api_err("Failed to get tag")?
        .or_not_found("Tag not found")?;

    Ok::<_, ApiError>(Json(ApiResponse::success(tag)))
}

pub async fn create_tag(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<NewTag>,
) -> impl IntoResponse {
    validate_tag_name(&req.tag_name)?;

    let tag = state
        .store
        .create_tag(&req)
        .api_err("Failed to create tag")?;

    Ok::<_, ApiError>(Json(ApiResponse::success(tag)))
}

pub async fn update_tag(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    ApiJson(req): ApiJson<TagUpdate>,
) -> impl IntoResponse {
    if let Some(name) = &req.tag_name {
        validate_tag_name(name)?;
    }

    let affected = state
        .store
        .update_tag(id, &req)
        .api_err("Failed to update tag")?;

    let affected = require_affected(affected, "Tag not found")?;

    Ok::<_, ApiError>(Json(ApiResponse::success(affected)))
}

/// Edges pointing at the tag are removed along with it.
pub async fn delete_tag(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    let affected = state
        .store
        .delete_tag(id)
        .api_err("Failed to delete tag")?;

    let affected = require_affected(affected, "Tag not found")?;

    Ok::<_, ApiError>(Json(ApiResponse::success(affected)))
}
