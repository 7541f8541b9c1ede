use std::cmp::{Ordering, Reverse};

use feruca::Collator;
use storefront_types::Product;

/// Ordering applied to a filtered listing. All orderings are stable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    PriceAsc,
    PriceDesc,
    NameAsc,
    NameDesc,
    /// Most recent first, by [`Product::effective_timestamp`].
    Newest,
}

impl SortKey {
    /// Parses a query-string sort value. Unknown values yield `None`,
    /// which leaves the listing in input order.
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "price_asc" => Some(Self::PriceAsc),
            "price_desc" => Some(Self::PriceDesc),
            "name_asc" => Some(Self::NameAsc),
            "name_desc" => Some(Self::NameDesc),
            "newest" => Some(Self::Newest),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PriceAsc => "price_asc",
            Self::PriceDesc => "price_desc",
            Self::NameAsc => "name_asc",
            Self::NameDesc => "name_desc",
            Self::Newest => "newest",
        }
    }

    pub(crate) fn apply(self, list: &mut [&Product]) {
        match self {
            Self::PriceAsc => list.sort_by(|a, b| price_cmp(a.price, b.price)),
            Self::PriceDesc => list.sort_by(|a, b| price_cmp(b.price, a.price)),
            Self::NameAsc => {
                let mut collator = Collator::default();
                list.sort_by(|a, b| name_cmp(&mut collator, &a.name, &b.name));
            }
            Self::NameDesc => {
                let mut collator = Collator::default();
                list.sort_by(|a, b| name_cmp(&mut collator, &b.name, &a.name));
            }
            Self::Newest => list.sort_by_cached_key(|p| Reverse(p.effective_timestamp())),
        }
    }
}

impl std::fmt::Display for SortKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// Prices are coerced to finite values on load, so partial_cmp only
// returns None for NaN written by hand; treat that as a tie.
fn price_cmp(a: f64, b: f64) -> Ordering {
    a.partial_cmp(&b).unwrap_or(Ordering::Equal)
}

// CLDR root collation. Names it ranks equal but that differ in bytes
// still get a fixed order, lower case first.
fn name_cmp(collator: &mut Collator, a: &str, b: &str) -> Ordering {
    collator.collate(a, b).then_with(|| b.cmp(a))
}
