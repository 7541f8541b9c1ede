//! Core type definitions for the storefront catalog.
//!
//! This crate defines the record types shared by the query engine, the
//! catalog store and the HTTP layer:
//! - [`Product`]: a catalog record, deserialized leniently from stored JSON
//! - [`ProductPatch`]: the narrow set of fields an update may change
//! - Product id generation and the `prod_<millis>` id convention
//! - Effective timestamps used for recency ordering

pub mod coerce;
mod ids;
mod product;
mod timestamp;

pub use ids::{PRODUCT_ID_PREFIX, generate_product_id, id_millis};
pub use product::{Product, ProductPatch};
pub use timestamp::{now_millis, parse_timestamp_millis};

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when building records from untyped JSON.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid product: {0}")]
    InvalidProduct(String),
}
