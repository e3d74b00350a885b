//! Lenient date-as-text parsing.
//!
//! Extracted dates arrive in several textual shapes ("2025-11-23",
//! "2025-11-23 14:00", ISO datetimes, occasionally "23.11.2025" from
//! legacy rows) plus placeholder values like "TBD". Everything is
//! normalized to a calendar day; unparseable values resolve to `None`
//! rather than erroring.

use chrono::{NaiveDate, NaiveDateTime};

/// Parse a textual date to a calendar day, best-effort.
pub fn parse_day(value: &str) -> Option<NaiveDate> {
    let s = value.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("tbd") || s.eq_ignore_ascii_case("n/a") {
        return None;
    }

    // ISO day prefix covers "2025-11-23", "2025-11-23 14:00" and
    // "2025-11-23T14:00:00" in one pass.
    if let Some(prefix) = s.get(..10) {
        if let Ok(d) = NaiveDate::parse_from_str(prefix, "%Y-%m-%d") {
            return Some(d);
        }
    }

    for fmt in ["%Y-%m-%d %H:%M", "%Y-%m-%dT%H:%M:%S", "%d.%m.%Y"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Some(d);
        }
    }

    None
}

/// Normalize a textual date to canonical "YYYY-MM-DD" storage form.
/// Unparseable input passes through unchanged.
pub fn normalize_day(value: &str) -> String {
    match parse_day(value) {
        Some(d) => d.format("%Y-%m-%d").to_string(),
        None => value.trim().to_string(),
    }
}
