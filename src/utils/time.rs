//! Time utilities: timestamp and UTC offset parsing.

use crate::errors::{AppError, AppResult};
use chrono::{FixedOffset, NaiveDateTime};

/// Parse `YYYY-MM-DD HH:MM:SS` or `YYYY-MM-DD HH:MM` (also with a `T`).
pub fn parse_timestamp(s: &str) -> Option<NaiveDateTime> {
    let s = s.trim();
    [
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d %H:%M",
        "%Y-%m-%dT%H:%M:%S",
        "%Y-%m-%dT%H:%M",
    ]
    .iter()
    .find_map(|fmt| NaiveDateTime::parse_from_str(s, fmt).ok())
}

/// Parse a `±HH:MM` offset such as `+07:00`.
pub fn parse_utc_offset(s: &str) -> AppResult<FixedOffset> {
    let invalid = || AppError::Config(format!("Invalid utc_offset '{}', expected ±HH:MM", s));

    let t = s.trim();
    let (sign, rest) = match t.chars().next() {
        Some('+') => (1, &t[1..]),
        Some('-') => (-1, &t[1..]),
        _ => return Err(invalid()),
    };

    let (hh, mm) = rest.split_once(':').ok_or_else(invalid)?;
    let hours: i32 = hh.parse().map_err(|_| invalid())?;
    let minutes: i32 = mm.parse().map_err(|_| invalid())?;
    if hh.len() != 2 || mm.len() != 2 || hours > 14 || minutes > 59 {
        return Err(invalid());
    }

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60)).ok_or_else(invalid)
}
