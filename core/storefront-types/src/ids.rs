//! Product identifier conventions.
//!
//! Server-assigned ids have the form `prod_<epoch-millis>`, which lets the
//! id double as a creation time when a record carries no `createdAt`.

/// Prefix of server-assigned product ids.
pub const PRODUCT_ID_PREFIX: &str = "prod_";

/// Extracts the millis encoded in a `prod_<digits>` id.
///
/// Only the leading digit run after the prefix is read, so `prod_12x`
/// yields `12`. Returns `None` for other ids or when the digits overflow.
#[must_use]
pub fn id_millis(id: &str) -> Option<i64> {
    let rest = id.strip_prefix(PRODUCT_ID_PREFIX)?;
    let end = rest
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(rest.len());
    rest[..end].parse().ok()
}

/// Generates an unused `prod_<millis>` id, starting at `now_millis` and
/// stepping forward one millisecond while `taken` reports a collision.
#[must_use]
pub fn generate_product_id(now_millis: i64, taken: impl Fn(&str) -> bool) -> String {
    let mut millis = now_millis.max(0);
    loop {
        let id = format!("{PRODUCT_ID_PREFIX}{millis}");
        if !taken(&id) {
            return id;
        }
        millis = millis.saturating_add(1);
    }
}
