//! # Storefront
//!
//! An e-commerce back end serving categories, products and tags as a JSON
//! API, usable both as a standalone binary and as a library.
//!
//! ## Library Usage
//!
//! ```toml
//! [dependencies]
//! storefront = { version = "0.0.1", default-features = false }
//! ```
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use storefront::server::{AppState, create_router};
//! use storefront::store::{SqliteStore, Store};
//!
//! let store = SqliteStore::new("./data/storefront.db").unwrap();
//! store.initialize().unwrap();
//!
//! let state = Arc::new(AppState::new(Arc::new(store)));
//! let router = create_router(state);
//! // Serve with axum...
//! ```
//!
//! ## Feature Flags
//!
//! - `cli` (default): Builds the `storefront` binary. Disable with `default-features = false`.

pub mod config;
pub mod error;
pub mod seed;
pub mod server;
pub mod store;
pub mod sync;
pub mod types;
