use serde::Deserialize;

use crate::sort::SortKey;

/// Page used when none (or an invalid one) is requested.
pub const DEFAULT_PAGE: usize = 1;

/// Page size used when none (or an invalid one) is requested.
pub const DEFAULT_LIMIT: usize = 12;

/// Listing parameters exactly as they arrive on the query string.
///
/// Every field is optional text; [`QueryParams::from`] does the
/// normalization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawQueryParams {
    pub store_id: Option<String>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub sort: Option<String>,
    pub page: Option<String>,
    pub limit: Option<String>,
}

/// Normalized listing parameters.
///
/// Text filters are `None` when absent or empty. `page` and `limit` hold
/// whatever integer was requested; use [`effective_page`] and
/// [`effective_limit`] for the values the engine actually applies.
///
/// [`effective_page`]: QueryParams::effective_page
/// [`effective_limit`]: QueryParams::effective_limit
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    pub store_id: Option<String>,
    pub category: Option<String>,
    pub search: Option<String>,
    pub sort: Option<SortKey>,
    pub page: Option<i64>,
    pub limit: Option<i64>,
}

impl QueryParams {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn store_id(mut self, store_id: impl Into<String>) -> Self {
        self.store_id = non_empty(Some(store_id.into()));
        self
    }

    #[must_use]
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = non_empty(Some(category.into()));
        self
    }

    #[must_use]
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = non_empty(Some(search.into()));
        self
    }

    #[must_use]
    pub fn sort(mut self, sort: SortKey) -> Self {
        self.sort = Some(sort);
        self
    }

    #[must_use]
    pub fn page(mut self, page: i64) -> Self {
        self.page = Some(page);
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// 1-based page index; anything missing or below 1 becomes [`DEFAULT_PAGE`].
    #[must_use]
    pub fn effective_page(&self) -> usize {
        positive_or(self.page, DEFAULT_PAGE)
    }

    /// Page size; anything missing or below 1 becomes [`DEFAULT_LIMIT`].
    #[must_use]
    pub fn effective_limit(&self) -> usize {
        positive_or(self.limit, DEFAULT_LIMIT)
    }
}

impl From<RawQueryParams> for QueryParams {
    fn from(raw: RawQueryParams) -> Self {
        Self {
            store_id: non_empty(raw.store_id),
            category: non_empty(raw.category),
            search: non_empty(raw.search),
            sort: raw.sort.as_deref().and_then(SortKey::parse),
            page: raw.page.as_deref().and_then(parse_int_prefix),
            limit: raw.limit.as_deref().and_then(parse_int_prefix),
        }
    }
}

/// Reads a base-10 integer the way lenient query-string parsing does:
/// leading whitespace, an optional sign, then the longest run of digits.
/// Trailing text is ignored (`"3abc"` is 3, `"2.9"` is 2). Returns `None`
/// when there are no digits; a value too large for an `i64` clamps to
/// `i64::MAX` (or `i64::MIN` when negative).
#[must_use]
pub fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    // Digit runs too long for i64 saturate instead of failing.
    Some(match (negative, digits[..end].parse::<i64>()) {
        (false, Ok(n)) => n,
        (true, Ok(n)) => -n,
        (false, Err(_)) => i64::MAX,
        (true, Err(_)) => i64::MIN,
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|s| !s.is_empty())
}

fn positive_or(value: Option<i64>, default: usize) -> usize {
    match value {
        Some(n) if n > 0 => usize::try_from(n).unwrap_or(default),
        _ => default,
    }
}
