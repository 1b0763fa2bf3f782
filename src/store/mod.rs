mod schema;
mod sqlite;

pub use sqlite::SqliteStore;

use crate::error::Result;
use crate::sync::TagSyncOutcome;
use crate::types::*;

/// Store defines the database interface.
///
/// Every entity gets the same set of accessors: plain and eager-loaded reads,
/// create, and update/delete returning the number of rows touched.
pub trait Store: Send + Sync {
    fn initialize(&self) -> Result<()>;

    // Category operations
    fn list_categories(&self) -> Result<Vec<Category>>;
    fn list_categories_detailed(&self) -> Result<Vec<CategoryWithProducts>>;
    fn get_category(&self, id: i64) -> Result<Option<Category>>;
    fn get_category_detailed(&self, id: i64) -> Result<Option<CategoryWithProducts>>;
    fn create_category(&self, fields: &NewCategory) -> Result<Category>;
    fn update_category(&self, id: i64, fields: &CategoryUpdate) -> Result<usize>;
    fn delete_category(&self, id: i64) -> Result<usize>;

    // Product operations
    fn list_products(&self) -> Result<Vec<Product>>;
    fn list_products_detailed(&self) -> Result<Vec<ProductDetail>>;
    fn get_product(&self, id: i64) -> Result<Option<Product>>;
    fn get_product_detailed(&self, id: i64) -> Result<Option<ProductDetail>>;
    /// Creates the product and, when `tag_ids` is given, its initial tag edges
    /// in the same transaction.
    fn create_product(
        &self,
        fields: &NewProduct,
        tag_ids: Option<&[i64]>,
    ) -> Result<(Product, Option<TagSyncOutcome>)>;
    /// Updates the product and, when it exists and `tag_ids` is given,
    /// reconciles its tags in the same transaction.
    fn update_product(
        &self,
        id: i64,
        fields: &ProductUpdate,
        tag_ids: Option<&[i64]>,
    ) -> Result<(usize, Option<TagSyncOutcome>)>;
    fn delete_product(&self, id: i64) -> Result<usize>;

    // Tag operations (many-to-many with products)
    fn list_tags(&self) -> Result<Vec<Tag>>;
    fn list_tags_detailed(&self) -> Result<Vec<TagWithProducts>>;
    fn get_tag(&self, id: i64) -> Result<Option<Tag>>;
    fn get_tag_detailed(&self, id: i64) -> Result<Option<TagWithProducts>>;
    fn create_tag(&self, fields: &NewTag) -> Result<Tag>;
    fn update_tag(&self, id: i64, fields: &TagUpdate) -> Result<usize>;
    fn delete_tag(&self, id: i64) -> Result<usize>;

    // Product-Tag M2M operations
    fn list_product_tags(&self, product_id: i64) -> Result<Vec<ProductTag>>;
    fn bulk_create_product_tags(&self, rows: &[NewProductTag]) -> Result<Vec<ProductTag>>;
    fn bulk_delete_product_tags(&self, ids: &[i64]) -> Result<usize>;
    /// Reconciles the product's edges with `desired` atomically. The product
    /// itself is not checked; a missing product or tag surfaces as a
    /// referential error from the database.
    fn sync_product_tags(&self, product_id: i64, desired: &[i64]) -> Result<TagSyncOutcome>;
}
