use chrono::format::{Item, StrftimeItems};
use chrono::{NaiveDate, NaiveDateTime};
use std::fmt::Write;

const FALLBACK_DATE_FORMAT: &str = "%Y-%m-%d";

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

/// True when chrono understands every specifier in `pattern`.
pub fn is_valid_pattern(pattern: &str) -> bool {
    !StrftimeItems::new(pattern).any(|item| matches!(item, Item::Error))
}

/// Render a calendar day with the configured pattern (e.g. `%d/%m/%Y`).
/// An unusable pattern falls back to `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate, pattern: &str) -> String {
    let mut out = String::new();
    if write!(out, "{}", date.format(pattern)).is_ok() {
        return out;
    }
    date.format(FALLBACK_DATE_FORMAT).to_string()
}

/// Storage form of a session timestamp.
pub fn timestamp_to_db(ts: NaiveDateTime) -> String {
    ts.format("%Y-%m-%d %H:%M:%S").to_string()
}

pub fn date_to_db(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
