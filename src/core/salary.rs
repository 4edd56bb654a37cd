//! Pure wage arithmetic: elapsed time → credited hours → salary.

use chrono::NaiveDateTime;

/// Tolerance used when comparing 2-decimal quantities stored as f64.
pub const EPSILON: f64 = 1e-6;

/// Round half away from zero to 2 decimal places.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `a >= b` on 2-decimal quantities.
pub fn at_least(a: f64, b: f64) -> bool {
    a + EPSILON >= b
}

pub struct SalaryEngine;

impl SalaryEngine {
    /// Wall-clock hours between two local timestamps (may be negative).
    pub fn elapsed_hours(from: NaiveDateTime, to: NaiveDateTime) -> f64 {
        (to - from).num_milliseconds() as f64 / 3_600_000.0
    }

    /// Hours left under the daily cap, never negative.
    pub fn remaining_cap(daily_cap: f64, completed_today: f64) -> f64 {
        round2((daily_cap - completed_today).max(0.0))
    }

    /// Elapsed hours bounded by what is left of the cap, rounded.
    pub fn credit(elapsed_hours: f64, remaining_cap: f64) -> f64 {
        round2(elapsed_hours.min(remaining_cap).max(0.0))
    }

    /// Wage for `hours` at `rate`, rounded on its own.
    pub fn price(hours: f64, rate: f64) -> f64 {
        round2(hours * rate)
    }
}
