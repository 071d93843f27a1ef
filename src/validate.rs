//! Safe coercion of untrusted text into domain values.
//!
//! These functions are total: whatever the input, they return a usable value,
//! degrading to the caller's fallback instead of failing. They are the only
//! barrier between persisted/typed-in text and the domain model.

use chrono::{Local, NaiveDate};

/// Sentinel used for text fields that arrive empty or unusable.
pub const UNKNOWN: &str = "unknown";

/// Date format used everywhere a date crosses the text boundary.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Current local calendar day. Single clock access point for the crate.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Trim `value`; an empty or missing result degrades to `fallback`.
pub fn safe_text(value: Option<&str>, fallback: &str) -> String {
    match value {
        Some(s) => {
            let s = s.trim();
            if s.is_empty() {
                fallback.to_string()
            } else {
                s.to_string()
            }
        }
        None => fallback.to_string(),
    }
}

/// Parse a boolean token, case-insensitive: `true`/`1`/`yes` and
/// `false`/`0`/`no`. Other integers map zero/non-zero; anything else
/// returns `fallback`.
pub fn safe_bool(value: Option<&str>, fallback: bool) -> bool {
    let Some(s) = value else { return fallback };
    match s.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => true,
        "false" | "0" | "no" => false,
        other => match other.parse::<i64>() {
            Ok(n) => n != 0,
            Err(_) => fallback,
        },
    }
}

/// Parse a `YYYY-MM-DD` date; on failure return `fallback`, or today when no
/// fallback is given.
pub fn safe_date(value: Option<&str>, fallback: Option<NaiveDate>) -> NaiveDate {
    value
        .and_then(|s| NaiveDate::parse_from_str(s.trim(), DATE_FORMAT).ok())
        .or(fallback)
        .unwrap_or_else(today)
}
