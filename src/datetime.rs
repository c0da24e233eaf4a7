//! Date/time utilities for WLD.
//!
//! Timestamps are stored in UTC as `YYYY-MM-DD HH:MM:SS` text. Projections
//! always emit them as RFC 3339 strings.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};

/// Storage format of timestamp columns.
pub const DB_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Parse a stored timestamp (storage format or RFC 3339) as UTC.
pub fn parse_utc(datetime_str: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(datetime_str) {
        return Some(dt.with_timezone(&Utc));
    }

    // Postgres and SQLite may append fractional seconds
    NaiveDateTime::parse_from_str(datetime_str, DB_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(datetime_str, "%Y-%m-%d %H:%M:%S%.f"))
        .ok()
        .map(|naive| naive.and_utc())
}

/// Convert a stored timestamp to an RFC 3339 UTC string (`2024-01-15T10:30:00Z`).
///
/// Unparseable input is returned unchanged.
pub fn to_rfc3339(datetime_str: &str) -> String {
    match parse_utc(datetime_str) {
        Some(dt) => dt.to_rfc3339_opts(SecondsFormat::Secs, true),
        None => datetime_str.to_string(),
    }
}
