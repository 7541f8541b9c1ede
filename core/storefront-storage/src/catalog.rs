//! Catalog service: listings plus create/update/delete over a [`CatalogStore`].

use std::sync::Arc;

use serde::Serialize;
use serde_json::Value;
use storefront_query::{Page, QueryParams, query};
use storefront_types::{Product, ProductPatch, generate_product_id, now_millis};
use tracing::{debug, info, warn};

use crate::error::{StorageError, StorageResult};
use crate::store::{CatalogStore, load_or_empty};

/// Attempts per mutation before a revision conflict is surfaced.
pub const MAX_WRITE_ATTEMPTS: usize = 3;

/// Related products shown alongside a product detail.
pub const RELATED_LIMIT: usize = 4;

/// A product together with others from its category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductDetail {
    pub product: Product,
    pub related: Vec<Product>,
}

/// Read and write access to the catalog held by one store.
///
/// Reads tolerate an unreadable document (empty catalog). Writes load
/// strictly, apply a single change and save conditionally on the loaded
/// revision, so concurrent writers never silently drop each other's
/// changes.
#[derive(Clone)]
pub struct Catalog {
    store: Arc<dyn CatalogStore>,
}

impl Catalog {
    pub fn new(store: Arc<dyn CatalogStore>) -> Self {
        Self { store }
    }

    #[must_use]
    pub fn store(&self) -> &Arc<dyn CatalogStore> {
        &self.store
    }

    /// Runs a listing query against the current catalog.
    pub fn list(&self, params: &QueryParams) -> Page<Product> {
        let snapshot = load_or_empty(self.store.as_ref());
        query(&snapshot.products, params).map(Clone::clone)
    }

    /// Number of products currently in the catalog.
    pub fn count(&self) -> usize {
        load_or_empty(self.store.as_ref()).products.len()
    }

    /// Looks up a product and up to [`RELATED_LIMIT`] others in its category.
    pub fn detail(&self, id: &str) -> StorageResult<ProductDetail> {
        let snapshot = load_or_empty(self.store.as_ref());
        let product = snapshot
            .products
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or_else(|| StorageError::NotFound("Product not found".into()))?;

        let category = product.category.to_lowercase();
        let related = snapshot
            .products
            .iter()
            .filter(|p| p.id != product.id && p.category.to_lowercase() == category)
            .take(RELATED_LIMIT)
            .cloned()
            .collect();

        Ok(ProductDetail { product, related })
    }

    /// Adds a product. A missing id is assigned as `prod_<millis>`.
    pub fn create(&self, value: Value) -> StorageResult<Product> {
        let product = Product::from_value(value)?;
        if product.store_id.is_none() {
            return Err(StorageError::Validation(
                "Invalid product or missing storeId".into(),
            ));
        }

        let created = self.mutate(|products| {
            let mut product = product.clone();
            if product.id.is_empty() {
                product.id =
                    generate_product_id(now_millis(), |id| products.iter().any(|p| p.id == id));
            } else if products.iter().any(|p| p.id == product.id) {
                return Err(StorageError::Validation(format!(
                    "Product id already exists: {}",
                    product.id
                )));
            }
            products.push(product.clone());
            Ok(product)
        })?;

        info!(id = %created.id, store_id = ?created.store_id, "Product created");
        Ok(created)
    }

    /// Applies a patch to the product matching both its `id` and `storeId`.
    pub fn update(&self, value: Value) -> StorageResult<Product> {
        let patch = ProductPatch::from_value(value)?;

        let updated = self.mutate(|products| {
            let existing = products
                .iter_mut()
                .find(|p| p.id == patch.id && p.store_id() == Some(patch.store_id.as_str()))
                .ok_or_else(|| StorageError::NotFound("Product not found".into()))?;
            existing.apply(&patch);
            Ok(existing.clone())
        })?;

        info!(id = %updated.id, store_id = %patch.store_id, "Product updated");
        Ok(updated)
    }

    /// Removes the first product with `id`, restricted to `store_id` when
    /// one is given.
    pub fn delete(&self, id: &str, store_id: Option<&str>) -> StorageResult<Product> {
        if id.is_empty() {
            return Err(StorageError::Validation("Missing id".into()));
        }
        let store_id = store_id.filter(|s| !s.is_empty());

        let removed = self.mutate(|products| {
            let idx = products
                .iter()
                .position(|p| p.id == id && store_id.is_none_or(|s| p.store_id() == Some(s)))
                .ok_or_else(|| StorageError::NotFound("Product not found".into()))?;
            Ok(products.remove(idx))
        })?;

        info!(id = %removed.id, store_id = ?removed.store_id, "Product deleted");
        Ok(removed)
    }

    /// Load, apply `change`, save on the loaded revision; reload and retry
    /// on conflict.
    fn mutate<T>(
        &self,
        mut change: impl FnMut(&mut Vec<Product>) -> StorageResult<T>,
    ) -> StorageResult<T> {
        let mut attempt = 1;
        loop {
            let snapshot = self.store.load_all()?;
            let mut products = snapshot.products;
            let out = change(&mut products)?;

            match self.store.save_all(products, snapshot.revision) {
                Ok(revision) => {
                    debug!(revision, attempt, "Catalog mutation committed");
                    return Ok(out);
                }
                Err(StorageError::Conflict { expected, actual }) if attempt < MAX_WRITE_ATTEMPTS => {
                    warn!(expected, actual, attempt, "Catalog changed during write, retrying");
                    attempt += 1;
                }
                Err(e) => return Err(e),
            }
        }
    }
}
