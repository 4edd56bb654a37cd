//! Attendance & payroll engine: wires the tracker, the salary rules and the
//! monthly aggregator to a user store and a clock.
//!
//! The engine does no logging and no retries. Every mutation runs through
//! `UserStore::update`, so a failed operation writes nothing.

use crate::core::aggregator::MonthlyAggregator;
use crate::core::clock::Clock;
use crate::core::query::QueryView;
use crate::core::store::UserStore;
use crate::core::tracker::{DutyPolicy, SessionClosed, SessionStarted, SessionTracker};
use crate::errors::AppResult;
use crate::models::day_summary::DailySummary;
use crate::models::month_summary::{MonthKey, MonthTotals};
use chrono::NaiveDate;
use serde::Serialize;

/// A priced close, plus the totals it was folded into.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClosedShift {
    pub session: SessionClosed,
    pub month: MonthKey,
    pub month_totals: MonthTotals,
    pub career_total: f64,
}

pub struct AttendanceEngine<'a, S: UserStore, C: Clock + ?Sized> {
    store: &'a mut S,
    clock: &'a C,
    tracker: SessionTracker,
}

impl<'a, S: UserStore, C: Clock + ?Sized> AttendanceEngine<'a, S, C> {
    pub fn new(store: &'a mut S, clock: &'a C, policy: DutyPolicy) -> Self {
        Self {
            store,
            clock,
            tracker: SessionTracker::new(policy),
        }
    }

    pub fn check_in(&mut self, user_id: i64) -> AppResult<SessionStarted> {
        let now = self.clock.now();
        let tracker = &self.tracker;
        self.store
            .update(user_id, |user| Ok(tracker.check_in(user, now)?))
    }

    pub fn check_off(&mut self, user_id: i64) -> AppResult<ClosedShift> {
        let now = self.clock.now();
        let tracker = &self.tracker;
        self.store.update(user_id, |user| {
            let session = tracker.check_off(user, now)?;
            let month = MonthlyAggregator::fold_close(user, &session);
            Ok(ClosedShift {
                month_totals: QueryView::monthly_summary(user, month),
                career_total: user.career_total,
                session,
                month,
            })
        })
    }

    pub fn daily_summary(&mut self, user_id: i64, date: NaiveDate) -> AppResult<DailySummary> {
        let user = self.store.load(user_id)?;
        Ok(QueryView::daily_summary(
            &user,
            date,
            &self.tracker.policy(),
        ))
    }

    pub fn monthly_summary(&mut self, user_id: i64, month: MonthKey) -> AppResult<MonthTotals> {
        let user = self.store.load(user_id)?;
        Ok(QueryView::monthly_summary(&user, month))
    }

    /// Calendar day of the engine clock.
    pub fn today(&self) -> NaiveDate {
        self.clock.now().date()
    }

    pub fn current_month(&self) -> MonthKey {
        MonthKey::of(self.clock.now())
    }
}
