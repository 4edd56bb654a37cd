use crate::core::salary::round2;
use crate::core::tracker::SessionClosed;
use crate::models::month_summary::{MonthKey, MonthSummary};
use crate::models::user::User;

pub struct MonthlyAggregator;

impl MonthlyAggregator {
    /// Fold a closed session into the month of its close time and into the
    /// career total. New months go to the front of the history.
    pub fn fold_close(user: &mut User, closed: &SessionClosed) -> MonthKey {
        let key = MonthKey::of(closed.off_time);

        let idx = match user.monthly_history.iter().position(|m| m.month == key) {
            Some(i) => i,
            None => {
                user.monthly_history.insert(0, MonthSummary::empty(key));
                0
            }
        };

        let month = &mut user.monthly_history[idx];
        month.hours = round2(month.hours + closed.hours);
        month.salary = round2(month.salary + closed.salary);

        user.career_total = round2(user.career_total + closed.salary);

        key
    }
}
