//! Lenient field coercion for stored product JSON.
//!
//! Catalog documents are written by several clients and are not validated
//! on write, so a field may hold a number where text was expected or a
//! numeric string where a number was expected. These helpers are used as
//! `deserialize_with` targets and never fail on a well-formed JSON value.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Numeric value of a JSON value, with `0` for anything non-numeric.
///
/// Numbers pass through, strings are trimmed and parsed (empty is `0`),
/// booleans map to `1`/`0`. Non-finite results collapse to `0`.
#[must_use]
pub fn number_or_zero(value: &Value) -> f64 {
    let n = match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                trimmed.parse::<f64>().unwrap_or(0.0)
            }
        }
        Value::Bool(true) => 1.0,
        _ => 0.0,
    };
    if n.is_finite() { n } else { 0.0 }
}

/// Non-negative integer value of a JSON value; fractions truncate,
/// negatives and non-numbers become `0`.
#[must_use]
pub fn count_or_zero(value: &Value) -> u64 {
    let n = number_or_zero(value);
    if n <= 0.0 { 0 } else { n.trunc() as u64 }
}

/// Text value of a JSON value. Numbers and booleans are rendered,
/// `null` and containers become the empty string.
#[must_use]
pub fn text_or_empty(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    }
}

pub fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(number_or_zero(&Value::deserialize(deserializer)?))
}

pub fn count<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(count_or_zero(&Value::deserialize(deserializer)?))
}

pub fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text_or_empty(&Value::deserialize(deserializer)?))
}

/// Optional text; `null` and the empty string both read as absent.
pub fn opt_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    if value.is_null() {
        return Ok(None);
    }
    let s = text_or_empty(&value);
    Ok(if s.is_empty() { None } else { Some(s) })
}

/// Text in a patch. Only `null` reads as absent; the empty string is kept
/// so a patch can clear a field.
pub fn patch_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(if value.is_null() { None } else { Some(text_or_empty(&value)) })
}

pub fn opt_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(if value.is_null() { None } else { Some(number_or_zero(&value)) })
}

pub fn opt_count<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(if value.is_null() { None } else { Some(count_or_zero(&value)) })
}
