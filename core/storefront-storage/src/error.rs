//! Error types for the catalog store.

use thiserror::Error;

/// Result type for storage operations.
pub type StorageResult<T> = Result<T, StorageError>;

/// Errors that can occur in catalog storage and mutation.
#[derive(Debug, Error)]
pub enum StorageError {
    /// A write request is missing a required field or is malformed.
    #[error("{0}")]
    Validation(String),

    /// No record matches the requested id (and store, when given).
    #[error("{0}")]
    NotFound(String),

    /// The document changed between load and save.
    #[error("revision conflict: expected {expected}, found {actual}")]
    Conflict { expected: u64, actual: u64 },

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error (file system).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A store lock was poisoned by a panicking writer.
    #[error("store lock poisoned")]
    LockPoisoned,
}

impl From<storefront_types::Error> for StorageError {
    fn from(err: storefront_types::Error) -> Self {
        match err {
            storefront_types::Error::InvalidProduct(msg) => Self::Validation(msg),
            storefront_types::Error::Serialization(e) => {
                Self::Validation(format!("Invalid product: {e}"))
            }
        }
    }
}
