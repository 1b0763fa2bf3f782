use rust_decimal::Decimal;

use crate::server::response::ApiError;
use crate::types::{NewProduct, ProductUpdate};

const MAX_NAME_LEN: usize = 100;
const MAX_PRICE_SCALE: u32 = 2;

fn validate_name(name: &str, entity: &str) -> Result<(), String> {
    if name.trim().is_empty() {
        return Err(format!("{entity} name cannot be empty"));
    }
    if name.chars().count() > MAX_NAME_LEN {
        return Err(format!(
            "{entity} name cannot exceed {MAX_NAME_LEN} characters"
        ));
    }
    Ok(())
}

fn check_price(price: &Decimal) -> Result<(), String> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err("Price cannot be negative".to_string());
    }
    if price.normalize().scale() > MAX_PRICE_SCALE {
        return Err(format!(
            "Price cannot have more than {MAX_PRICE_SCALE} decimal places"
        ));
    }
    Ok(())
}

fn check_stock(stock: i64) -> Result<(), String> {
    if stock < 0 {
        return Err("Stock cannot be negative".to_string());
    }
    Ok(())
}

pub fn validate_category_name(name: &str) -> Result<(), ApiError> {
    validate_name(name, "Category").map_err(ApiError::bad_request)
}

pub fn validate_tag_name(name: &str) -> Result<(), ApiError> {
    validate_name(name, "Tag").map_err(ApiError::bad_request)
}

pub fn validate_tag_ids(tag_ids: &[i64]) -> Result<(), ApiError> {
    if let Some(id) = tag_ids.iter().find(|id| **id <= 0) {
        return Err(ApiError::bad_request(format!("Invalid tag id: {id}")));
    }
    Ok(())
}

pub fn validate_new_product(product: &NewProduct) -> Result<(), ApiError> {
    validate_name(&product.product_name, "Product")
        .and_then(|()| check_price(&product.price))
        .and_then(|()| check_stock(product.stock))
        .map_err(ApiError::bad_request)
}

pub fn validate_product_update(update: &ProductUpdate) -> Result<(), ApiError> {
    if let Some(name) = &update.product_name {
        validate_name(name, "Product").map_err(ApiError::bad_request)?;
    }
    if let Some(price) = &update.price {
        check_price(price).map_err(ApiError::bad_request)?;
    }
    if let Some(stock) = update.stock {
        check_stock(stock).map_err(ApiError::bad_request)?;
    }
    Ok(())
}
