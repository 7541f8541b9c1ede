use serde::Serialize;

/// One page of a listing plus its pagination metadata.
///
/// Serializes as `{ products, total, page, limit, totalPages }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    #[serde(rename = "products")]
    pub items: Vec<T>,
    /// Matching records before slicing.
    pub total: usize,
    /// The requested page, not clamped to `total_pages`.
    pub page: usize,
    pub limit: usize,
    /// `max(1, ceil(total / limit))`.
    pub total_pages: usize,
}

impl<T> Page<T> {
    /// Slices page `page` (1-based) of size `limit` out of `list`.
    ///
    /// Both `page` and `limit` must already be at least 1. A page past the
    /// end is empty but keeps the listing's `total` and `total_pages`.
    pub(crate) fn slice(list: Vec<T>, page: usize, limit: usize) -> Self {
        let total = list.len();
        let total_pages = total.div_ceil(limit).max(1);
        let start = (page - 1).saturating_mul(limit);

        let items = if start >= total {
            Vec::new()
        } else {
            let end = start.saturating_add(limit).min(total);
            list.into_iter().skip(start).take(end - start).collect()
        };

        Self {
            items,
            total,
            page,
            limit,
            total_pages,
        }
    }

    /// Converts the items, keeping the metadata.
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            limit: self.limit,
            total_pages: self.total_pages,
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}
