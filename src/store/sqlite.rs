use std::collections::HashMap;
use std::path::Path;
use std::str::FromStr;
use std::sync::Mutex;

use rusqlite::types::{Type, Value};
use rusqlite::{Connection, Row, params, params_from_iter};
use rust_decimal::Decimal;

use super::Store;
use super::schema::SCHEMA;
use crate::error::{Error, Result};
use crate::sync::{TagDiff, TagSyncOutcome};
use crate::types::*;

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn new<P: AsRef<Path>>(db_path: P) -> Result<Self> {
        let conn = Connection::open(db_path)?;

        conn.pragma_update(None, "foreign_keys", "ON")?;
        conn.pragma_update(None, "journal_mode", "WAL")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// A private database that disappears with the store. Used by tests.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.pragma_update(None, "foreign_keys", "ON")?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(|e| e.into_inner())
    }
}

fn parse_price(idx: usize, raw: String) -> rusqlite::Result<Decimal> {
    Decimal::from_str(&raw)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e)))
}

fn format_price(price: &Decimal) -> String {
    price.to_string()
}

fn product_from_row(row: &Row<'_>) -> rusqlite::Result<Product> {
    Ok(Product {
        id: row.get(0)?,
        product_name: row.get(1)?,
        price: parse_price(2, row.get(2)?)?,
        stock: row.get(3)?,
        category_id: row.get(4)?,
    })
}

fn count_rows(conn: &Connection, table: &str, id: i64) -> Result<usize> {
    let count: i64 = conn.query_row(
        &format!("SELECT COUNT(*) FROM {table} WHERE id = ?1"),
        params![id],
        |row| row.get(0),
    )?;
    Ok(count as usize)
}

fn select_product_tags(conn: &Connection, product_id: i64) -> Result<Vec<ProductTag>> {
    let mut stmt = conn.prepare(
        "SELECT id, product_id, tag_id FROM product_tags WHERE product_id = ?1 ORDER BY id",
    )?;

    let rows = stmt.query_map(params![product_id], |row| {
        Ok(ProductTag {
            id: row.get(0)?,
            product_id: row.get(1)?,
            tag_id: row.get(2)?,
        })
    })?;

    rows.collect::<std::result::Result<Vec<_>, _>>()
        .map_err(Error::from)
}

fn insert_product_tags(conn: &Connection, rows: &[NewProductTag]) -> Result<Vec<ProductTag>> {
    let mut stmt =
        conn.prepare_cached("INSERT INTO product_tags (product_id, tag_id) VALUES (?1, ?2)")?;

    let mut created = Vec::with_capacity(rows.len());
    for row in rows {
        stmt.execute(params![row.product_id, row.tag_id])?;
        created.push(ProductTag {
            id: conn.last_insert_rowid(),
            product_id: row.product_id,
            tag_id: row.tag_id,
        });
    }
    Ok(created)
}

fn delete_product_tags(conn: &Connection, ids: &[i64]) -> Result<usize> {
    let mut stmt = conn.prepare_cached("DELETE FROM product_tags WHERE id = ?1")?;

    let mut deleted = 0;
    for id in ids {
        deleted += stmt.execute(params![id])?;
    }
    Ok(deleted)
}

fn sync_tags(conn: &Connection, product_id: i64, desired: &[i64]) -> Result<TagSyncOutcome> {
    let current = select_product_tags(conn, product_id)?;
    let diff = TagDiff::compute(product_id, &current, desired);

    if diff.is_empty() {
        tracing::debug!("Tags for product {} already in sync", product_id);
        return Ok(TagSyncOutcome::default());
    }

    delete_product_tags(conn, &diff.to_remove)?;
    let added = insert_product_tags(conn, &diff.to_add)?;

    tracing::debug!(
        "Synced tags for product {}: {} added, {} removed",
        product_id,
        added.len(),
        diff.to_remove.len()
    );

    Ok(TagSyncOutcome {
        added,
        removed: diff.to_remove,
    })
}

fn select_categories(conn: &Connection, id: Option<i64>) -> Result<Vec<Category>> {
    let mut stmt = conn.prepare(
        "SELECT id, category_name FROM categories WHERE (?1 IS NULL OR id = ?1) ORDER BY id",
    )?;

    let rows = stmt.query_map(params![id], |row| {
        Ok(Category {
            id: row.get(0)?,
            category_name: row.get(1)?,
        })
    })?;

    rows.collect::<std::result::Result<Vec<_>, _>>()
        .map_err(Error::from)
}

fn select_categories_detailed(
    conn: &Connection,
    id: Option<i64>,
) -> Result<Vec<CategoryWithProducts>> {
    let categories = select_categories(conn, id)?;

    let mut stmt = conn.prepare(
        "SELECT id, product_name, price, stock, category_id
         FROM products
         WHERE category_id IS NOT NULL AND (?1 IS NULL OR category_id = ?1)
         ORDER BY id",
    )?;
    let products = stmt
        .query_map(params![id], product_from_row)?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut by_category: HashMap<i64, Vec<Product>> = HashMap::new();
    for product in products {
        if let Some(category_id) = product.category_id {
            by_category.entry(category_id).or_default().push(product);
        }
    }

    Ok(categories
        .into_iter()
        .map(|category| CategoryWithProducts {
            products: by_category.remove(&category.id).unwrap_or_default(),
            category,
        })
        .collect())
}

fn select_products(conn: &Connection, id: Option<i64>) -> Result<Vec<Product>> {
    let mut stmt = conn.prepare(
        "SELECT id, product_name, price, stock, category_id
         FROM products WHERE (?1 IS NULL OR id = ?1) ORDER BY id",
    )?;

    let rows = stmt.query_map(params![id], product_from_row)?;

    rows.collect::<std::result::Result<Vec<_>, _>>()
        .map_err(Error::from)
}

fn select_products_detailed(conn: &Connection, id: Option<i64>) -> Result<Vec<ProductDetail>> {
    let mut stmt = conn.prepare(
        "SELECT p.id, p.product_name, p.price, p.stock, c.category_name
         FROM products p
         LEFT JOIN categories c ON c.id = p.category_id
         WHERE (?1 IS NULL OR p.id = ?1)
         ORDER BY p.id",
    )?;
    let mut products = stmt
        .query_map(params![id], |row| {
            Ok(ProductDetail {
                id: row.get(0)?,
                product_name: row.get(1)?,
                price: parse_price(2, row.get(2)?)?,
                stock: row.get(3)?,
                category: row
                    .get::<_, Option<String>>(4)?
                    .map(|category_name| CategoryName { category_name }),
                tags: Vec::new(),
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut stmt = conn.prepare(
        "SELECT pt.product_id, t.tag_name
         FROM product_tags pt
         JOIN tags t ON t.id = pt.tag_id
         WHERE (?1 IS NULL OR pt.product_id = ?1)
         ORDER BY pt.id",
    )?;
    let edges = stmt
        .query_map(params![id], |row| {
            Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?))
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut by_product: HashMap<i64, Vec<TagName>> = HashMap::new();
    for (product_id, tag_name) in edges {
        by_product
            .entry(product_id)
            .or_default()
            .push(TagName { tag_name });
    }
    for product in &mut products {
        product.tags = by_product.remove(&product.id).unwrap_or_default();
    }

    Ok(products)
}

fn select_tags(conn: &Connection, id: Option<i64>) -> Result<Vec<Tag>> {
    let mut stmt =
        conn.prepare("SELECT id, tag_name FROM tags WHERE (?1 IS NULL OR id = ?1) ORDER BY id")?;

    let rows = stmt.query_map(params![id], |row| {
        Ok(Tag {
            id: row.get(0)?,
            tag_name: row.get(1)?,
        })
    })?;

    rows.collect::<std::result::Result<Vec<_>, _>>()
        .map_err(Error::from)
}

fn select_tags_detailed(conn: &Connection, id: Option<i64>) -> Result<Vec<TagWithProducts>> {
    let tags = select_tags(conn, id)?;

    let mut stmt = conn.prepare(
        "SELECT pt.tag_id, p.product_name, p.price, p.stock, p.category_id
         FROM product_tags pt
         JOIN products p ON p.id = pt.product_id
         WHERE (?1 IS NULL OR pt.tag_id = ?1)
         ORDER BY pt.id",
    )?;
    let edges = stmt
        .query_map(params![id], |row| {
            Ok((
                row.get::<_, i64>(0)?,
                TaggedProduct {
                    product_name: row.get(1)?,
                    price: parse_price(2, row.get(2)?)?,
                    stock: row.get(3)?,
                    category_id: row.get(4)?,
                },
            ))
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let mut by_tag: HashMap<i64, Vec<TaggedProduct>> = HashMap::new();
    for (tag_id, product) in edges {
        by_tag.entry(tag_id).or_default().push(product);
    }

    Ok(tags
        .into_iter()
        .map(|tag| TagWithProducts {
            products: by_tag.remove(&tag.id).unwrap_or_default(),
            tag,
        })
        .collect())
}

impl Store for SqliteStore {
    fn initialize(&self) -> Result<()> {
        self.conn().execute_batch(SCHEMA)?;
        Ok(())
    }

    // Category operations

    fn list_categories(&self) -> Result<Vec<Category>> {
        select_categories(&self.conn(), None)
    }

    fn list_categories_detailed(&self) -> Result<Vec<CategoryWithProducts>> {
        select_categories_detailed(&self.conn(), None)
    }

    fn get_category(&self, id: i64) -> Result<Option<Category>> {
        Ok(select_categories(&self.conn(), Some(id))?.into_iter().next())
    }

    fn get_category_detailed(&self, id: i64) -> Result<Option<CategoryWithProducts>> {
        Ok(select_categories_detailed(&self.conn(), Some(id))?
            .into_iter()
            .next())
    }

    fn create_category(&self, fields: &NewCategory) -> Result<Category> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO categories (category_name) VALUES (?1)",
            params![fields.category_name],
        )?;

        Ok(Category {
            id: conn.last_insert_rowid(),
            category_name: fields.category_name.clone(),
        })
    }

    fn update_category(&self, id: i64, fields: &CategoryUpdate) -> Result<usize> {
        let conn = self.conn();
        match &fields.category_name {
            Some(name) => Ok(conn.execute(
                "UPDATE categories SET category_name = ?1 WHERE id = ?2",
                params![name, id],
            )?),
            None => count_rows(&conn, "categories", id),
        }
    }

    fn delete_category(&self, id: i64) -> Result<usize> {
        let rows = self
            .conn()
            .execute("DELETE FROM categories WHERE id = ?1", params![id])?;
        Ok(rows)
    }

    // Product operations

    fn list_products(&self) -> Result<Vec<Product>> {
        select_products(&self.conn(), None)
    }

    fn list_products_detailed(&self) -> Result<Vec<ProductDetail>> {
        select_products_detailed(&self.conn(), None)
    }

    fn get_product(&self, id: i64) -> Result<Option<Product>> {
        Ok(select_products(&self.conn(), Some(id))?.into_iter().next())
    }

    fn get_product_detailed(&self, id: i64) -> Result<Option<ProductDetail>> {
        Ok(select_products_detailed(&self.conn(), Some(id))?
            .into_iter()
            .next())
    }

    fn create_product(
        &self,
        fields: &NewProduct,
        tag_ids: Option<&[i64]>,
    ) -> Result<(Product, Option<TagSyncOutcome>)> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;

        tx.execute(
            "INSERT INTO products (product_name, price, stock, category_id)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                fields.product_name,
                format_price(&fields.price),
                fields.stock,
                fields.category_id,
            ],
        )?;

        let product = Product {
            id: tx.last_insert_rowid(),
            product_name: fields.product_name.clone(),
            price: fields.price,
            stock: fields.stock,
            category_id: fields.category_id,
        };

        let tags = match tag_ids {
            Some(desired) => Some(sync_tags(&tx, product.id, desired)?),
            None => None,
        };

        tx.commit()?;
        Ok((product, tags))
    }

    fn update_product(
        &self,
        id: i64,
        fields: &ProductUpdate,
        tag_ids: Option<&[i64]>,
    ) -> Result<(usize, Option<TagSyncOutcome>)> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;

        let mut assignments = Vec::new();
        let mut values = Vec::new();
        if let Some(name) = &fields.product_name {
            assignments.push("product_name = ?");
            values.push(Value::Text(name.clone()));
        }
        if let Some(price) = &fields.price {
            assignments.push("price = ?");
            values.push(Value::Text(format_price(price)));
        }
        if let Some(stock) = fields.stock {
            assignments.push("stock = ?");
            values.push(Value::Integer(stock));
        }
        if let Some(category_id) = fields.category_id {
            assignments.push("category_id = ?");
            values.push(category_id.map_or(Value::Null, Value::Integer));
        }

        let affected = if assignments.is_empty() {
            count_rows(&tx, "products", id)?
        } else {
            values.push(Value::Integer(id));
            let sql = format!(
                "UPDATE products SET {} WHERE id = ?",
                assignments.join(", ")
            );
            tx.execute(&sql, params_from_iter(values.iter()))?
        };

        let tags = match tag_ids {
            Some(desired) if affected > 0 => Some(sync_tags(&tx, id, desired)?),
            _ => None,
        };

        tx.commit()?;
        Ok((affected, tags))
    }

    fn delete_product(&self, id: i64) -> Result<usize> {
        let rows = self
            .conn()
            .execute("DELETE FROM products WHERE id = ?1", params![id])?;
        Ok(rows)
    }

    // Tag operations

    fn list_tags(&self) -> Result<Vec<Tag>> {
        select_tags(&self.conn(), None)
    }

    fn list_tags_detailed(&self) -> Result<Vec<TagWithProducts>> {
        select_tags_detailed(&self.conn(), None)
    }

    fn get_tag(&self, id: i64) -> Result<Option<Tag>> {
        Ok(select_tags(&self.conn(), Some(id))?.into_iter().next())
    }

    fn get_tag_detailed(&self, id: i64) -> Result<Option<TagWithProducts>> {
        Ok(select_tags_detailed(&self.conn(), Some(id))?.into_iter().next())
    }

    fn create_tag(&self, fields: &NewTag) -> Result<Tag> {
        let conn = self.conn();
        conn.execute(
            "INSERT INTO tags (tag_name) VALUES (?1)",
            params![fields.tag_name],
        )?;

        Ok(Tag {
            id: conn.last_insert_rowid(),
            tag_name: fields.tag_name.clone(),
        })
    }

    fn update_tag(&self, id: i64, fields: &TagUpdate) -> Result<usize> {
        let conn = self.conn();
        match &fields.tag_name {
            Some(name) => Ok(conn.execute(
                "UPDATE tags SET tag_name = ?1 WHERE id = ?2",
                params![name, id],
            )?),
            None => count_rows(&conn, "tags", id),
        }
    }

    fn delete_tag(&self, id: i64) -> Result<usize> {
        let rows = self
            .conn()
            .execute("DELETE FROM tags WHERE id = ?1", params![id])?;
        Ok(rows)
    }

    // Product-Tag M2M operations

    fn list_product_tags(&self, product_id: i64) -> Result<Vec<ProductTag>> {
        select_product_tags(&self.conn(), product_id)
    }

    fn bulk_create_product_tags(&self, rows: &[NewProductTag]) -> Result<Vec<ProductTag>> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;
        let created = insert_product_tags(&tx, rows)?;
        tx.commit()?;
        Ok(created)
    }

    fn bulk_delete_product_tags(&self, ids: &[i64]) -> Result<usize> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;
        let deleted = delete_product_tags(&tx, ids)?;
        tx.commit()?;
        Ok(deleted)
    }

    fn sync_product_tags(&self, product_id: i64, desired: &[i64]) -> Result<TagSyncOutcome> {
        let mut conn = self.conn();
        let tx = conn.transaction()?;
        let outcome = sync_tags(&tx, product_id, desired)?;
        tx.commit()?;
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> SqliteStore {
        let store = SqliteStore::open_in_memory().unwrap();
        store.initialize().unwrap();
        store
    }

    fn new_product(name: &str, category_id: Option<i64>) -> NewProduct {
        NewProduct {
            product_name: name.to_string(),
            price: Decimal::new(1499, 2),
            stock: 10,
            category_id,
        }
    }

    fn tag(store: &SqliteStore, name: &str) -> i64 {
        store
            .create_tag(&NewTag {
                tag_name: name.to_string(),
            })
            .unwrap()
            .id
    }

    fn tag_ids(store: &SqliteStore, product_id: i64) -> Vec<i64> {
        let mut ids: Vec<i64> = store
            .list_product_tags(product_id)
            .unwrap()
            .into_iter()
            .map(|edge| edge.tag_id)
            .collect();
        ids.sort_unstable();
        ids
    }

    #[test]
    fn test_initialize_creates_tables() {
        let temp = TempDir::new().unwrap();
        let store = SqliteStore::new(temp.path().join("test.db")).unwrap();
        store.initialize().unwrap();
        store.initialize().unwrap();

        let conn = store.conn();
        let tables: Vec<String> = conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .collect::<std::result::Result<Vec<_>, _>>()
            .unwrap();

        assert!(tables.contains(&"categories".to_string()));
        assert!(tables.contains(&"products".to_string()));
        assert!(tables.contains(&"tags".to_string()));
        assert!(tables.contains(&"product_tags".to_string()));
    }

    #[test]
    fn test_category_crud() {
        let store = store();

        let created = store
            .create_category(&NewCategory {
                category_name: "Shirts".to_string(),
            })
            .unwrap();

        let fetched = store.get_category(created.id).unwrap().unwrap();
        assert_eq!(fetched.category_name, "Shirts");

        let updated = store
            .update_category(
                created.id,
                &CategoryUpdate {
                    category_name: Some("Tees".to_string()),
                },
            )
            .unwrap();
        assert_eq!(updated, 1);
        assert_eq!(
            store.get_category(created.id).unwrap().unwrap().category_name,
            "Tees"
        );

        assert_eq!(store.delete_category(created.id).unwrap(), 1);
        assert!(store.get_category(created.id).unwrap().is_none());
        assert_eq!(store.delete_category(created.id).unwrap(), 0);
    }

    #[test]
    fn test_update_missing_rows_reports_zero() {
        let store = store();
        assert_eq!(
            store
                .update_category(99, &CategoryUpdate::default())
                .unwrap(),
            0
        );
        assert_eq!(
            store
                .update_tag(
                    99,
                    &TagUpdate {
                        tag_name: Some("x".to_string())
                    }
                )
                .unwrap(),
            0
        );

        let (affected, tags) = store
            .update_product(99, &ProductUpdate::default(), Some(&[1]))
            .unwrap();
        assert_eq!(affected, 0);
        assert!(tags.is_none());
    }

    #[test]
    fn test_create_product_bootstraps_tags() {
        let store = store();
        let blue = tag(&store, "blue");
        let red = tag(&store, "red");

        let (product, tags) = store
            .create_product(&new_product("Cargo Shorts", None), Some(&[blue, red, blue]))
            .unwrap();

        let outcome = tags.unwrap();
        assert_eq!(outcome.added.len(), 2);
        assert!(outcome.removed.is_empty());
        assert_eq!(tag_ids(&store, product.id), vec![blue, red]);
    }

    #[test]
    fn test_create_product_without_tag_ids_skips_sync() {
        let store = store();
        let (product, tags) = store
            .create_product(&new_product("Cargo Shorts", None), None)
            .unwrap();
        assert!(tags.is_none());
        assert!(store.list_product_tags(product.id).unwrap().is_empty());
    }

    #[test]
    fn test_sync_applies_minimal_diff() {
        let store = store();
        let one = tag(&store, "one");
        let two = tag(&store, "two");
        let three = tag(&store, "three");
        let (product, _) = store
            .create_product(&new_product("Hat", None), Some(&[one, two]))
            .unwrap();
        let before = store.list_product_tags(product.id).unwrap();
        let kept = before.iter().find(|edge| edge.tag_id == two).unwrap().id;
        let dropped = before.iter().find(|edge| edge.tag_id == one).unwrap().id;

        let outcome = store.sync_product_tags(product.id, &[two, three]).unwrap();
        assert_eq!(outcome.removed, vec![dropped]);
        assert_eq!(outcome.added.len(), 1);
        assert_eq!(outcome.added[0].tag_id, three);

        let after = store.list_product_tags(product.id).unwrap();
        assert!(after.iter().any(|edge| edge.id == kept));
        assert_eq!(tag_ids(&store, product.id), vec![two, three]);

        let again = store.sync_product_tags(product.id, &[two, three]).unwrap();
        assert!(again.is_noop());
    }

    #[test]
    fn test_sync_with_empty_set_clears_tags() {
        let store = store();
        let seven = tag(&store, "seven");
        let (product, _) = store
            .create_product(&new_product("Vinyl", None), Some(&[seven]))
            .unwrap();

        let outcome = store.sync_product_tags(product.id, &[]).unwrap();
        assert_eq!(outcome.removed.len(), 1);
        assert!(store.list_product_tags(product.id).unwrap().is_empty());
    }

    #[test]
    fn test_sync_with_unknown_tag_rolls_back() {
        let store = store();
        let keep = tag(&store, "keep");
        let (product, _) = store
            .create_product(&new_product("Sneakers", None), Some(&[keep]))
            .unwrap();

        let result = store.update_product(
            product.id,
            &ProductUpdate {
                stock: Some(1),
                ..Default::default()
            },
            Some(&[404]),
        );
        assert!(matches!(result, Err(Error::Referential(_))));

        assert_eq!(tag_ids(&store, product.id), vec![keep]);
        assert_eq!(store.get_product(product.id).unwrap().unwrap().stock, 10);
    }

    #[test]
    fn test_create_product_with_unknown_category_is_referential() {
        let store = store();
        let result = store.create_product(&new_product("Orphan", Some(77)), None);
        assert!(matches!(result, Err(Error::Referential(_))));
        assert!(store.list_products().unwrap().is_empty());
    }

    #[test]
    fn test_negative_stock_is_rejected() {
        let store = store();
        let mut fields = new_product("Broken", None);
        fields.stock = -1;
        let result = store.create_product(&fields, None);
        assert!(matches!(result, Err(Error::Validation(_))));
    }

    #[test]
    fn test_update_product_fields() {
        let store = store();
        let shirts = store
            .create_category(&NewCategory {
                category_name: "Shirts".to_string(),
            })
            .unwrap();
        let (product, _) = store
            .create_product(&new_product("Plain T-Shirt", Some(shirts.id)), None)
            .unwrap();

        let (affected, tags) = store
            .update_product(
                product.id,
                &ProductUpdate {
                    price: Some(Decimal::new(999, 2)),
                    category_id: Some(None),
                    ..Default::default()
                },
                None,
            )
            .unwrap();
        assert_eq!(affected, 1);
        assert!(tags.is_none());

        let fetched = store.get_product(product.id).unwrap().unwrap();
        assert_eq!(fetched.price, Decimal::new(999, 2));
        assert_eq!(fetched.category_id, None);
        assert_eq!(fetched.product_name, "Plain T-Shirt");
    }

    #[test]
    fn test_deleting_product_or_tag_cascades_to_edges() {
        let store = store();
        let gold = tag(&store, "gold");
        let white = tag(&store, "white");
        let (hat, _) = store
            .create_product(&new_product("Hat", None), Some(&[gold, white]))
            .unwrap();
        let (shirt, _) = store
            .create_product(&new_product("Shirt", None), Some(&[gold]))
            .unwrap();

        assert_eq!(store.delete_tag(gold).unwrap(), 1);
        assert_eq!(tag_ids(&store, hat.id), vec![white]);
        assert!(store.list_product_tags(shirt.id).unwrap().is_empty());

        assert_eq!(store.delete_product(hat.id).unwrap(), 1);
        let remaining: i64 = store
            .conn()
            .query_row("SELECT COUNT(*) FROM product_tags", [], |row| row.get(0))
            .unwrap();
        assert_eq!(remaining, 0);
    }

    #[test]
    fn test_deleting_category_uncategorizes_products() {
        let store = store();
        let shoes = store
            .create_category(&NewCategory {
                category_name: "Shoes".to_string(),
            })
            .unwrap();
        let (product, _) = store
            .create_product(&new_product("Running Sneakers", Some(shoes.id)), None)
            .unwrap();

        store.delete_category(shoes.id).unwrap();
        assert_eq!(
            store.get_product(product.id).unwrap().unwrap().category_id,
            None
        );
    }

    #[test]
    fn test_detailed_reads_include_related_rows() {
        let store = store();
        let music = store
            .create_category(&NewCategory {
                category_name: "Music".to_string(),
            })
            .unwrap();
        store
            .create_category(&NewCategory {
                category_name: "Empty".to_string(),
            })
            .unwrap();
        let rock = tag(&store, "rock music");
        let pop = tag(&store, "pop music");
        let (vinyl, _) = store
            .create_product(&new_product("Vinyl", Some(music.id)), Some(&[rock, pop]))
            .unwrap();

        let categories = store.list_categories_detailed().unwrap();
        assert_eq!(categories.len(), 2);
        assert_eq!(categories[0].products, vec![
            store.get_product(vinyl.id).unwrap().unwrap()
        ]);
        assert!(categories[1].products.is_empty());

        let detail = store.get_product_detailed(vinyl.id).unwrap().unwrap();
        assert_eq!(detail.category.unwrap().category_name, "Music");
        let names: Vec<&str> = detail.tags.iter().map(|t| t.tag_name.as_str()).collect();
        assert_eq!(names, vec!["rock music", "pop music"]);

        let tagged = store.get_tag_detailed(rock).unwrap().unwrap();
        assert_eq!(tagged.tag.tag_name, "rock music");
        assert_eq!(tagged.products.len(), 1);
        assert_eq!(tagged.products[0].product_name, "Vinyl");
        assert_eq!(tagged.products[0].category_id, Some(music.id));

        assert!(store.get_product_detailed(9999).unwrap().is_none());
        assert!(store.get_tag_detailed(9999).unwrap().is_none());
        assert!(store.get_category_detailed(9999).unwrap().is_none());
    }

    #[test]
    fn test_bulk_product_tag_operations() {
        let store = store();
        let a = tag(&store, "a");
        let b = tag(&store, "b");
        let (product, _) = store
            .create_product(&new_product("Thing", None), None)
            .unwrap();

        let created = store
            .bulk_create_product_tags(&[
                NewProductTag {
                    product_id: product.id,
                    tag_id: a,
                },
                NewProductTag {
                    product_id: product.id,
                    tag_id: b,
                },
            ])
            .unwrap();
        assert_eq!(created.len(), 2);
        assert_ne!(created[0].id, created[1].id);

        let deleted = store
            .bulk_delete_product_tags(&[created[0].id, 12345])
            .unwrap();
        assert_eq!(deleted, 1);
        assert_eq!(tag_ids(&store, product.id), vec![b]);
    }

    #[test]
    fn test_price_round_trips_through_text_column() {
        let store = store();
        let mut fields = new_product("Sneakers", None);
        fields.price = Decimal::new(9000, 2);
        let (product, _) = store.create_product(&fields, None).unwrap();

        let fetched = store.get_product(product.id).unwrap().unwrap();
        assert_eq!(fetched.price, Decimal::new(90, 0));
    }
}
