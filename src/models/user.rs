use super::month_summary::MonthSummary;
use super::session::Session;
use crate::core::salary::round2;
use chrono::NaiveDate;
use serde::Serialize;

/// A member record: profile fields plus the attendance ledger.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub display_name: String,
    pub position: String,
    pub rank: String,
    pub salary_rate: f64,
    pub career_total: f64,
    pub attendance: Vec<Session>,
    pub monthly_history: Vec<MonthSummary>,
    pub created_at: String,
}

impl User {
    /// The single open session, if any.
    pub fn open_session(&self) -> Option<&Session> {
        self.attendance.iter().rev().find(|s| s.is_open())
    }

    pub fn is_on_duty(&self) -> bool {
        self.open_session().is_some()
    }

    /// Sum of credited hours over closed sessions dated `day`.
    pub fn completed_hours_on(&self, day: NaiveDate) -> f64 {
        self.attendance
            .iter()
            .filter(|s| s.date == day && s.is_closed())
            .map(|s| s.hours)
            .sum()
    }

    /// Fill defaults and repair inconsistent shapes. Applied once per load.
    pub fn normalize(&mut self, default_rate: f64) {
        if !self.salary_rate.is_finite() || self.salary_rate <= 0.0 {
            self.salary_rate = default_rate;
        }

        if !self.career_total.is_finite() || self.career_total < 0.0 {
            self.career_total = 0.0;
        }

        // Month keys are unique: merge later duplicates into the first row.
        let mut merged: Vec<MonthSummary> = Vec::with_capacity(self.monthly_history.len());
        for row in self.monthly_history.drain(..) {
            if let Some(existing) = merged.iter_mut().find(|m| m.month == row.month) {
                existing.hours = round2(existing.hours + row.hours);
                existing.salary = round2(existing.salary + row.salary);
            } else {
                merged.push(row);
            }
        }
        self.monthly_history = merged;
    }
}
