use chrono::NaiveDate;
use serde::Serialize;

/// Today's duty progress for one member.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailySummary {
    pub date: NaiveDate,
    pub completed_hours: f64,
    pub remaining_hours: f64,
    pub is_on_duty: bool,
    pub can_check_in: bool,
}
