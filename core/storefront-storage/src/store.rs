use serde::{Deserialize, Serialize};
use storefront_types::Product;
use tracing::warn;

use crate::error::StorageResult;

/// On-disk shape of the catalog.
///
/// `revision` is absent from documents written before revisions existed
/// and reads as `0`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogDocument {
    #[serde(default)]
    pub products: Vec<Product>,
    #[serde(default)]
    pub revision: u64,
}

/// A full copy of the catalog at one revision.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Snapshot {
    pub products: Vec<Product>,
    pub revision: u64,
}

impl From<CatalogDocument> for Snapshot {
    fn from(doc: CatalogDocument) -> Self {
        Self {
            products: doc.products,
            revision: doc.revision,
        }
    }
}

/// Whole-collection catalog storage.
///
/// There are no partial updates: callers load a snapshot, change it, and
/// save the full collection back, naming the revision they loaded.
pub trait CatalogStore: Send + Sync {
    /// Loads the current catalog. A store that has never been written
    /// returns an empty snapshot at revision 0.
    fn load_all(&self) -> StorageResult<Snapshot>;

    /// Replaces the catalog if its revision still equals `expected_revision`.
    ///
    /// Returns the new revision, or [`StorageError::Conflict`] if another
    /// writer saved first.
    ///
    /// [`StorageError::Conflict`]: crate::StorageError::Conflict
    fn save_all(&self, products: Vec<Product>, expected_revision: u64) -> StorageResult<u64>;

    /// Makes all saved state durable. Called once at shutdown.
    fn flush(&self) -> StorageResult<()> {
        Ok(())
    }
}

/// Loads the catalog for a read, treating any failure as an empty catalog.
///
/// Listings stay available when the document is missing or corrupt; the
/// failure is logged and the caller sees no products.
pub fn load_or_empty(store: &dyn CatalogStore) -> Snapshot {
    match store.load_all() {
        Ok(snapshot) => snapshot,
        Err(e) => {
            warn!(error = %e, "Catalog unreadable, serving empty listing");
            Snapshot::default()
        }
    }
}
