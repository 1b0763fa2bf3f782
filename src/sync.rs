//! Reconciliation of a product's tag edges against a desired set of tag ids.
//!
//! [`TagDiff::compute`] is pure: it only looks at the edges it is handed. The
//! store loads the current edges, computes the diff and applies it inside a
//! single transaction, so the load and both writes see the same snapshot.

use std::collections::HashSet;

use serde::Serialize;

use crate::types::{NewProductTag, ProductTag};

/// The writes needed to move a product from its current edges to a desired tag set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagDiff {
    /// Edges to insert, one per desired tag the product does not carry yet.
    pub to_add: Vec<NewProductTag>,
    /// Primary keys of edges whose tag is no longer desired.
    pub to_remove: Vec<i64>,
}

impl TagDiff {
    /// Edges whose tag id is both current and desired are left alone. Repeated
    /// desired ids collapse to a single insertion, in first-seen order.
    pub fn compute(product_id: i64, current: &[ProductTag], desired: &[i64]) -> Self {
        let existing: HashSet<i64> = current.iter().map(|edge| edge.tag_id).collect();
        let wanted: HashSet<i64> = desired.iter().copied().collect();

        let mut seen = HashSet::with_capacity(desired.len());
        let to_add = desired
            .iter()
            .copied()
            .filter(|tag_id| !existing.contains(tag_id) && seen.insert(*tag_id))
            .map(|tag_id| NewProductTag { product_id, tag_id })
            .collect();

        let to_remove = current
            .iter()
            .filter(|edge| !wanted.contains(&edge.tag_id))
            .map(|edge| edge.id)
            .collect();

        Self { to_add, to_remove }
    }

    pub fn is_empty(&self) -> bool {
        self.to_add.is_empty() && self.to_remove.is_empty()
    }
}

/// What one reconciliation actually wrote.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TagSyncOutcome {
    pub added: Vec<ProductTag>,
    pub removed: Vec<i64>,
}

impl TagSyncOutcome {
    pub fn is_noop(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}
