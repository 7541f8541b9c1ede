//! Demo catalog content.

use storefront_types::Product;
use tracing::info;

use crate::error::StorageResult;
use crate::store::CatalogStore;

/// Store that owns the demo products.
const DEMO_STORE_ID: &str = "store_1";

/// The three products of the demo store.
#[must_use]
pub fn demo_products() -> Vec<Product> {
    let demo = |id: &str, name: &str, price: f64, description: &str, category: &str, stock: u64| {
        Product {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            price,
            category: category.into(),
            stock,
            store_id: Some(DEMO_STORE_ID.into()),
            ..Default::default()
        }
    };

    vec![
        demo(
            "prod_1",
            "Wireless Headphones",
            79.99,
            "Premium quality wireless headphones with noise cancellation",
            "Electronics",
            25,
        ),
        demo(
            "prod_2",
            "USB-C Cable",
            12.99,
            "Durable 6ft USB-C charging and data cable",
            "Electronics",
            100,
        ),
        demo(
            "prod_3",
            "Hand-Woven Hat",
            34.99,
            "Beautifully crafted hand-woven straw hat",
            "Clothing",
            15,
        ),
    ]
}

/// Writes the demo products if the catalog is empty. Returns whether it did.
pub fn seed_if_empty(store: &dyn CatalogStore) -> StorageResult<bool> {
    let snapshot = store.load_all()?;
    if !snapshot.products.is_empty() {
        return Ok(false);
    }
    let products = demo_products();
    let count = products.len();
    store.save_all(products, snapshot.revision)?;
    info!(count, store_id = DEMO_STORE_ID, "Seeded demo catalog");
    Ok(true)
}
