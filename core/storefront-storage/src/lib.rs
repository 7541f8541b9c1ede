//! Catalog persistence for the storefront.
//!
//! The catalog is a single JSON document, `{ "products": [...], "revision": n }`,
//! read and replaced as a whole. Stores are injected behind the
//! [`CatalogStore`] trait and opened explicitly; there is no process-wide
//! catalog.
//!
//! # Architecture
//!
//! - [`CatalogStore`] loads a [`Snapshot`] and saves a whole collection under
//!   a compare-and-swap on the document revision
//! - [`JsonFileStore`] persists to disk with atomic rename
//! - [`MemoryStore`] keeps the document in memory
//! - [`Catalog`] runs listings through the query engine and applies
//!   create/update/delete as load → change → conditional save, retrying on
//!   revision conflicts

mod catalog;
mod error;
mod json_file;
mod memory;
mod seed;
mod store;

pub use catalog::{Catalog, MAX_WRITE_ATTEMPTS, ProductDetail, RELATED_LIMIT};
pub use error::{StorageError, StorageResult};
pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
pub use seed::{demo_products, seed_if_empty};
pub use store::{CatalogDocument, CatalogStore, Snapshot, load_or_empty};
