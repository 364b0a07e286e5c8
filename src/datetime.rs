//! Timestamp conversion between storage and the API.
//!
//! SQLite's `CURRENT_TIMESTAMP` writes UTC as `YYYY-MM-DD HH:MM:SS` text.
//! API responses carry RFC3339, so rows are converted at the boundary.

use chrono::{NaiveDateTime, SecondsFormat};

/// Convert a stored UTC timestamp to RFC3339 (`2024-01-15T10:30:00Z`).
///
/// A value that does not parse as `YYYY-MM-DD HH:MM:SS` is returned
/// unchanged rather than dropped from the response.
pub fn to_rfc3339(stored: &str) -> String {
    match NaiveDateTime::parse_from_str(stored, "%Y-%m-%d %H:%M:%S") {
        Ok(naive) => naive.and_utc().to_rfc3339_opts(SecondsFormat::Secs, true),
        Err(_) => stored.to_string(),
    }
}
