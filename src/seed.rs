//! Sample catalog for local development and demos.

use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::store::Store;
use crate::types::{NewCategory, NewProduct, NewTag};

const CATEGORIES: [&str; 5] = ["Shirts", "Shorts", "Music", "Hats", "Shoes"];

const TAGS: [&str; 8] = [
    "rock music",
    "pop music",
    "blue",
    "red",
    "green",
    "white",
    "gold",
    "pop culture",
];

struct SeedProduct {
    name: &'static str,
    price_cents: i64,
    stock: i64,
    // Indexes into CATEGORIES and TAGS.
    category: usize,
    tags: &'static [usize],
}

const PRODUCTS: [SeedProduct; 5] = [
    SeedProduct {
        name: "Plain T-Shirt",
        price_cents: 1499,
        stock: 14,
        category: 0,
        tags: &[5, 6, 7],
    },
    SeedProduct {
        name: "Running Sneakers",
        price_cents: 9000,
        stock: 25,
        category: 4,
        tags: &[5],
    },
    SeedProduct {
        name: "Branded Baseball Hat",
        price_cents: 2299,
        stock: 12,
        category: 3,
        tags: &[0, 2, 3, 4],
    },
    SeedProduct {
        name: "Top 40 Music Compilation Vinyl Record",
        price_cents: 1299,
        stock: 50,
        category: 2,
        tags: &[0, 1, 7],
    },
    SeedProduct {
        name: "Cargo Shorts",
        price_cents: 2999,
        stock: 22,
        category: 1,
        tags: &[2],
    },
];

#[derive(Debug, Default, Serialize)]
pub struct SeedSummary {
    pub categories: usize,
    pub products: usize,
    pub tags: usize,
    pub product_tags: usize,
}

/// Loads the sample catalog into an empty database.
pub fn seed_all(store: &dyn Store) -> Result<SeedSummary> {
    if !store.list_categories()?.is_empty()
        || !store.list_products()?.is_empty()
        || !store.list_tags()?.is_empty()
    {
        return Err(Error::Conflict("database already contains data".to_string()));
    }

    let mut summary = SeedSummary::default();

    let mut category_ids = Vec::with_capacity(CATEGORIES.len());
    for name in CATEGORIES {
        let category = store.create_category(&NewCategory {
            category_name: name.to_string(),
        })?;
        category_ids.push(category.id);
        summary.categories += 1;
    }

    let mut tag_ids = Vec::with_capacity(TAGS.len());
    for name in TAGS {
        let tag = store.create_tag(&NewTag {
            tag_name: name.to_string(),
        })?;
        tag_ids.push(tag.id);
        summary.tags += 1;
    }

    for seed in &PRODUCTS {
        let fields = NewProduct {
            product_name: seed.name.to_string(),
            price: Decimal::new(seed.price_cents, 2),
            stock: seed.stock,
            category_id: Some(category_ids[seed.category]),
        };
        let desired: Vec<i64> = seed.tags.iter().map(|i| tag_ids[*i]).collect();

        let (_, tags) = store.create_product(&fields, Some(desired.as_slice()))?;
        summary.products += 1;
        summary.product_tags += tags.map_or(0, |outcome| outcome.added.len());
    }

    tracing::info!(
        "Seeded {} categories, {} products, {} tags, {} product tags",
        summary.categories,
        summary.products,
        summary.tags,
        summary.product_tags
    );

    Ok(summary)
}
