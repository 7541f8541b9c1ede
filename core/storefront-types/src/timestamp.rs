//! Timestamp parsing for recency ordering.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

/// Current wall-clock time in milliseconds since the Unix epoch.
#[must_use]
pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

/// Parses a stored `createdAt` value into epoch milliseconds.
///
/// Accepts RFC 3339 (`2024-05-01T10:00:00Z`, with offset), a zone-less
/// date-time read as UTC, and a bare `YYYY-MM-DD` date at midnight UTC.
#[must_use]
pub fn parse_timestamp_millis(s: &str) -> Option<i64> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc().timestamp_millis());
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc().timestamp_millis())
}
