pub const SCHEMA: &str = r#"
-- Product categories
CREATE TABLE IF NOT EXISTS categories (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    category_name TEXT NOT NULL CHECK (length(trim(category_name)) > 0)
);

-- Products (one category, many tags)
CREATE TABLE IF NOT EXISTS products (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    product_name TEXT NOT NULL CHECK (length(trim(product_name)) > 0),
    price TEXT NOT NULL CHECK (CAST(price AS REAL) >= 0),  -- decimal, kept as text
    stock INTEGER NOT NULL DEFAULT 0 CHECK (stock >= 0),

    -- Deleting a category leaves its products uncategorized
    category_id INTEGER REFERENCES categories(id) ON DELETE SET NULL
);

-- Tags for labeling products (many-to-many)
CREATE TABLE IF NOT EXISTS tags (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    tag_name TEXT NOT NULL CHECK (length(trim(tag_name)) > 0)
);

-- Many-to-many relationship between products and tags.
-- No uniqueness on (product_id, tag_id); the tag sync never inserts a pair twice.
CREATE TABLE IF NOT EXISTS product_tags (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    product_id INTEGER NOT NULL REFERENCES products(id) ON DELETE CASCADE,
    tag_id INTEGER NOT NULL REFERENCES tags(id) ON DELETE CASCADE
);

-- Create indexes
CREATE INDEX IF NOT EXISTS idx_products_category ON products(category_id);
CREATE INDEX IF NOT EXISTS idx_product_tags_product ON product_tags(product_id);
CREATE INDEX IF NOT EXISTS idx_product_tags_tag ON product_tags(tag_id);
"#;
