//! Read-only projections over a user record.

use crate::core::salary::{SalaryEngine, round2};
use crate::core::tracker::DutyPolicy;
use crate::models::day_summary::DailySummary;
use crate::models::month_summary::{MonthKey, MonthTotals};
use crate::models::session::Session;
use crate::models::user::User;
use chrono::NaiveDate;

/// Sessions sharing one `date`, in insertion order.
#[derive(Debug, Clone, PartialEq)]
pub struct DayGroup<'a> {
    pub date: NaiveDate,
    pub sessions: Vec<&'a Session>,
}

pub struct QueryView;

impl QueryView {
    pub fn daily_summary(user: &User, day: NaiveDate, policy: &DutyPolicy) -> DailySummary {
        let completed = round2(user.completed_hours_on(day));
        let remaining = SalaryEngine::remaining_cap(policy.daily_cap_hours, completed);
        let is_on_duty = user.is_on_duty();

        DailySummary {
            date: day,
            completed_hours: completed,
            remaining_hours: remaining,
            is_on_duty,
            can_check_in: remaining > 0.0 && !is_on_duty,
        }
    }

    pub fn monthly_summary(user: &User, key: MonthKey) -> MonthTotals {
        user.monthly_history
            .iter()
            .find(|m| m.month == key)
            .map(|m| m.totals())
            .unwrap_or_default()
    }

    /// Attendance grouped by session date, most recent date first.
    pub fn grouped_attendance(user: &User) -> Vec<DayGroup<'_>> {
        let mut groups: Vec<DayGroup<'_>> = Vec::new();

        for session in &user.attendance {
            match groups.iter_mut().find(|g| g.date == session.date) {
                Some(group) => group.sessions.push(session),
                None => groups.push(DayGroup {
                    date: session.date,
                    sessions: vec![session],
                }),
            }
        }

        groups.sort_by(|a, b| b.date.cmp(&a.date));
        groups
    }
}
