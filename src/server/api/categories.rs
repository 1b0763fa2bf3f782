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
use crate::server::validation::validate_category_name;
use crate::types::{CategoryUpdate, NewCategory};

pub async fn list_categories(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let categories = state
        .store
        .list_categories_detailed()
        .api_err("Failed to list categories")?;

    Ok::<_, ApiError>(Json(ApiResponse::success(categories)))
}

pub async fn get_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    let category = state
        .store
        .get_category_detailed(id)
        .api_err("Failed to get category")?
        .or_not_found("Category not found")?;

    Ok::<_, ApiError>(Json(ApiResponse::success(category)))
}

pub async fn create_category(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<NewCategory>,
) -> impl IntoResponse {
    validate_category_name(&req.category_name)?;

    let category = state
        .store
        .create_category(&req)
        .api_err("Failed to create category")?;

    tracing::debug!("Created category {}", category.id);

    Ok::<_, ApiError>(Json(ApiResponse::success(category)))
}

pub async fn update_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    ApiJson(req): ApiJson<CategoryUpdate>,
) -> impl IntoResponse {
    if let Some(name) = &req.category_name {
        validate_category_name(name)?;
    }

    let affected = state
        .store
        .update_category(id, &req)
        .api_err("Failed to update category")?;

    let affected = require_affected(affected, "Category not found")?;

    Ok::<_, ApiError>(Json(ApiResponse::success(affected)))
}

pub async fn delete_category(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    let affected = state
        .store
        .delete_category(id)
        .api_err("Failed to delete category")?;

    let affected = require_affected(affected, "Category not found")?;

    Ok::<_, ApiError>(Json(ApiResponse::success(affected)))
}
