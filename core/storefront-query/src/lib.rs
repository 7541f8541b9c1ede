//! Catalog query engine.
//!
//! Turns a full snapshot of the catalog plus a set of listing parameters into
//! one page of results. The pipeline is fixed:
//!
//! 1. keep records in the requested store (`storeId`, exact match)
//! 2. keep records in the requested category (case-insensitive)
//! 3. keep records whose name or description contains the search term
//! 4. reorder by the sort key, if any (stable)
//! 5. count, then slice out the requested page
//!
//! The engine is a pure function of its inputs: it never mutates records,
//! performs no I/O and never fails. Bad paging input is normalized.

mod page;
mod params;
mod sort;

pub use page::Page;
pub use params::{DEFAULT_LIMIT, DEFAULT_PAGE, QueryParams, RawQueryParams, parse_int_prefix};
pub use sort::SortKey;

use storefront_types::Product;

/// Runs one listing query against `products`.
#[must_use]
pub fn query<'a>(products: &'a [Product], params: &QueryParams) -> Page<&'a Product> {
    let mut list: Vec<&Product> = products.iter().collect();

    if let Some(store_id) = params.store_id.as_deref() {
        list.retain(|p| p.store_id() == Some(store_id));
    }

    if let Some(category) = params.category.as_deref() {
        let wanted = category.to_lowercase();
        list.retain(|p| p.category.to_lowercase() == wanted);
    }

    if let Some(search) = params.search.as_deref() {
        let needle = search.to_lowercase();
        list.retain(|p| {
            p.name.to_lowercase().contains(&needle)
                || p.description.to_lowercase().contains(&needle)
        });
    }

    if let Some(key) = params.sort {
        key.apply(&mut list);
    }

    Page::slice(list, params.effective_page(), params.effective_limit())
}
