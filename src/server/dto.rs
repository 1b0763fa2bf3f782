use axum::extract::FromRequest;
use serde::{Deserialize, Serialize};

use crate::server::response::ApiError;
use crate::sync::TagSyncOutcome;
use crate::types::{NewProduct, Product, ProductTag, ProductUpdate};

/// JSON body extractor whose rejections come back as 400s in the API envelope.
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct ApiJson<T>(pub T);

#[derive(Debug, Deserialize)]
pub struct CreateProductRequest {
    #[serde(flatten)]
    pub product: NewProduct,
    #[serde(default, rename = "tagIds", alias = "tag_ids")]
    pub tag_ids: Option<Vec<i64>>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProductRequest {
    #[serde(flatten)]
    pub changes: ProductUpdate,
    /// Absent means "leave tags alone"; an empty list removes every tag.
    #[serde(default, rename = "tagIds", alias = "tag_ids")]
    pub tag_ids: Option<Vec<i64>>,
}

#[derive(Debug, Serialize)]
pub struct ProductCreatedResponse {
    pub product: Product,
    pub product_tags: Vec<ProductTag>,
}

#[derive(Debug, Serialize)]
pub struct ProductUpdatedResponse {
    pub affected: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<TagSyncOutcome>,
}
