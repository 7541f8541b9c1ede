//! MemoryStore - in-memory catalog store for tests and demos.

use std::sync::RwLock;

use storefront_types::Product;

use crate::error::{StorageError, StorageResult};
use crate::store::{CatalogStore, Snapshot};

/// In-memory catalog store with the same revision semantics as the file
/// store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    state: RwLock<Snapshot>,
}

impl MemoryStore {
    /// Create a new empty store at revision 0.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding `products` at revision 0.
    #[must_use]
    pub fn with_products(products: Vec<Product>) -> Self {
        Self {
            state: RwLock::new(Snapshot {
                products,
                revision: 0,
            }),
        }
    }
}

impl CatalogStore for MemoryStore {
    fn load_all(&self) -> StorageResult<Snapshot> {
        let state = self.state.read().map_err(|_| StorageError::LockPoisoned)?;
        Ok(state.clone())
    }

    fn save_all(&self, products: Vec<Product>, expected_revision: u64) -> StorageResult<u64> {
        let mut state = self.state.write().map_err(|_| StorageError::LockPoisoned)?;
        if state.revision != expected_revision {
            return Err(StorageError::Conflict {
                expected: expected_revision,
                actual: state.revision,
            });
        }
        state.products = products;
        state.revision += 1;
        Ok(state.revision)
    }
}
