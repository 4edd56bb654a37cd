use crate::errors::AppError;
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use serde::{Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Month key rendered as `MM/YYYY`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthKey {
    pub year: i32,
    pub month: u32,
}

impl MonthKey {
    pub fn new(year: i32, month: u32) -> Option<Self> {
        if (1..=12).contains(&month) {
            Some(Self { year, month })
        } else {
            None
        }
    }

    pub fn of_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn of(ts: NaiveDateTime) -> Self {
        Self::of_date(ts.date())
    }
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02}/{}", self.month, self.year)
    }
}

impl FromStr for MonthKey {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || AppError::InvalidMonth(s.to_string());

        let (mm, yyyy) = s.trim().split_once('/').ok_or_else(invalid)?;
        if mm.len() != 2 || yyyy.len() != 4 {
            return Err(invalid());
        }

        let month = mm.parse::<u32>().map_err(|_| invalid())?;
        let year = yyyy.parse::<i32>().map_err(|_| invalid())?;
        MonthKey::new(year, month).ok_or_else(invalid)
    }
}

impl Serialize for MonthKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Per-month accumulated totals of a member (unique by `month`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthSummary {
    pub month: MonthKey,
    pub hours: f64,
    pub salary: f64,
}

impl MonthSummary {
    pub fn empty(month: MonthKey) -> Self {
        Self {
            month,
            hours: 0.0,
            salary: 0.0,
        }
    }

    pub fn totals(&self) -> MonthTotals {
        MonthTotals {
            hours: self.hours,
            salary: self.salary,
        }
    }
}

/// Zero-filled projection returned by monthly queries.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct MonthTotals {
    pub hours: f64,
    pub salary: f64,
}
