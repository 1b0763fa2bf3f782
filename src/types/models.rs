use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub category_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub product_name: String,
    pub price: Decimal,
    pub stock: i64,
    pub category_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i64,
    pub tag_name: String,
}

/// One edge of the product/tag many-to-many relation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductTag {
    pub id: i64,
    pub product_id: i64,
    pub tag_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewCategory {
    pub category_name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryUpdate {
    #[serde(default)]
    pub category_name: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewProduct {
    pub product_name: String,
    pub price: Decimal,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub category_id: Option<i64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductUpdate {
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub stock: Option<i64>,
    /// `None` leaves the column alone, `Some(None)` clears it.
    #[serde(default, deserialize_with = "present")]
    pub category_id: Option<Option<i64>>,
}

impl ProductUpdate {
    pub fn is_empty(&self) -> bool {
        self.product_name.is_none()
            && self.price.is_none()
            && self.stock.is_none()
            && self.category_id.is_none()
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewTag {
    pub tag_name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TagUpdate {
    #[serde(default)]
    pub tag_name: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NewProductTag {
    pub product_id: i64,
    pub tag_id: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryWithProducts {
    #[serde(flatten)]
    pub category: Category,
    pub products: Vec<Product>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryName {
    pub category_name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagName {
    pub tag_name: String,
}

/// A product with its category and tags projected down to their names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductDetail {
    pub id: i64,
    pub product_name: String,
    pub price: Decimal,
    pub stock: i64,
    pub category: Option<CategoryName>,
    pub tags: Vec<TagName>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaggedProduct {
    pub product_name: String,
    pub price: Decimal,
    pub stock: i64,
    pub category_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagWithProducts {
    #[serde(flatten)]
    pub tag: Tag,
    pub products: Vec<TaggedProduct>,
}

// Wraps any present value (including `null`) so that a missing field stays `None`.
fn present<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    T::deserialize(deserializer).map(Some)
}
