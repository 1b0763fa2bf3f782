use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    response::IntoResponse,
};

use crate::server::AppState;
use crate::server::dto::{
    ApiJson, CreateProductRequest, ProductCreatedResponse, ProductUpdatedResponse,
    UpdateProductRequest,
};
use crate::server::response::{
    ApiError, ApiResponse, StoreOptionExt, StoreResultExt, require_affected,
};
use crate::server::validation::{validate_new_product, validate_product_update, validate_tag_ids};

pub async fn list_products(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let products = state
        .store
        .list_products_detailed()
        .api_err("Failed to list products")?;

    Ok::<_, ApiError>(Json(ApiResponse::success(products)))
}

pub async fn get_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    let product = state
        .store
        .get_product_detailed(id)
        .api_err("Failed to get product")?
        .or_not_found("Product not found")?;

    Ok::<_, ApiError>(Json(ApiResponse::success(product)))
}

pub async fn create_product(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<CreateProductRequest>,
) -> impl IntoResponse {
    validate_new_product(&req.product)?;
    if let Some(tag_ids) = &req.tag_ids {
        validate_tag_ids(tag_ids)?;
    }

    let (product, tags) = state
        .store
        .create_product(&req.product, req.tag_ids.as_deref())
        .api_err("Failed to create product")?;

    tracing::debug!("Created product {}", product.id);

    let response = ProductCreatedResponse {
        product,
        product_tags: tags.map(|outcome| outcome.added).unwrap_or_default(),
    };

    Ok::<_, ApiError>(Json(ApiResponse::success(response)))
}

pub async fn update_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
    ApiJson(req): ApiJson<UpdateProductRequest>,
) -> impl IntoResponse {
    validate_product_update(&req.changes)?;
    if let Some(tag_ids) = &req.tag_ids {
        validate_tag_ids(tag_ids)?;
    }

    let (affected, tags) = state
        .store
        .update_product(id, &req.changes, req.tag_ids.as_deref())
        .api_err("Failed to update product")?;

    let affected = require_affected(affected, "Product not found")?;

    Ok::<_, ApiError>(Json(ApiResponse::success(ProductUpdatedResponse {
        affected: affected.affected,
        tags,
    })))
}

/// Edges pointing at the product are removed along with it.
pub async fn delete_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<i64>,
) -> impl IntoResponse {
    let affected = state
        .store
        .delete_product(id)
        .api_err("Failed to delete product")?;

    let affected = require_affected(affected, "Product not found")?;

    Ok::<_, ApiError>(Json(ApiResponse::success(affected)))
}
