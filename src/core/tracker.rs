//! Check-in / check-off state machine, one user at a time.
//!
//! ```text
//! Idle --check-in--> OnDuty --check-off--> Idle
//! ```
//!
//! Check-in from OnDuty fails with `SessionAlreadyOpen`; check-in from Idle
//! fails with `CapReached` once the day's closed hours reach the cap.

use crate::config::Config;
use crate::core::salary::{SalaryEngine, at_least};
use crate::errors::AttendanceError;
use crate::models::session::Session;
use crate::models::session_status::SessionStatus;
use crate::models::user::User;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DutyPolicy {
    pub daily_cap_hours: f64,
    pub min_session_minutes: i64,
}

impl Default for DutyPolicy {
    fn default() -> Self {
        Self {
            daily_cap_hours: 4.0,
            min_session_minutes: 60,
        }
    }
}

impl DutyPolicy {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            daily_cap_hours: cfg.daily_cap_hours,
            min_session_minutes: cfg.min_session_minutes,
        }
    }

    fn min_session_hours(&self) -> f64 {
        self.min_session_minutes as f64 / 60.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionStarted {
    pub date: NaiveDate,
    pub on_time: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionClosed {
    pub date: NaiveDate,
    pub on_time: NaiveDateTime,
    pub off_time: NaiveDateTime,
    pub hours: f64,
    pub salary: f64,
    pub status: SessionStatus,
}

pub struct SessionTracker {
    policy: DutyPolicy,
}

impl SessionTracker {
    pub fn new(policy: DutyPolicy) -> Self {
        Self { policy }
    }

    pub fn policy(&self) -> DutyPolicy {
        self.policy
    }

    pub fn check_in(
        &self,
        user: &mut User,
        now: NaiveDateTime,
    ) -> Result<SessionStarted, AttendanceError> {
        if user.is_on_duty() {
            return Err(AttendanceError::SessionAlreadyOpen);
        }

        let completed = user.completed_hours_on(now.date());
        if at_least(completed, self.policy.daily_cap_hours) {
            return Err(AttendanceError::CapReached);
        }

        let session = Session::open(now);
        let started = SessionStarted {
            date: session.date,
            on_time: session.on_time,
        };
        user.attendance.push(session);
        Ok(started)
    }

    /// Close the open session and price it.
    ///
    /// "Today" for cap accounting is the calendar day of `now`, not the
    /// session's own `date`: a shift that crosses midnight is capped against
    /// the day it ends on while still being filed under the day it started.
    pub fn check_off(
        &self,
        user: &mut User,
        now: NaiveDateTime,
    ) -> Result<SessionClosed, AttendanceError> {
        let idx = user
            .attendance
            .iter()
            .rposition(|s| s.is_open())
            .ok_or(AttendanceError::NoOpenSession)?;

        let on_time = user.attendance[idx].on_time;
        if now < on_time {
            return Err(AttendanceError::InvalidTimestamp(format!(
                "session opened at {} is later than check-off at {}",
                on_time.format("%Y-%m-%d %H:%M:%S"),
                now.format("%Y-%m-%d %H:%M:%S")
            )));
        }

        let elapsed = SalaryEngine::elapsed_hours(on_time, now);

        let (hours, salary, status) = if elapsed < self.policy.min_session_hours() {
            (0.0, 0.0, SessionStatus::Forfeited)
        } else {
            let completed_today = user.completed_hours_on(now.date());
            let remaining =
                SalaryEngine::remaining_cap(self.policy.daily_cap_hours, completed_today);
            let hours = SalaryEngine::credit(elapsed, remaining);
            let salary = SalaryEngine::price(hours, user.salary_rate);

            let status = if remaining > 0.0 && at_least(hours, remaining) {
                SessionStatus::CappedOut
            } else {
                SessionStatus::Completed
            };
            (hours, salary, status)
        };

        let session = &mut user.attendance[idx];
        session.off_time = Some(now);
        session.hours = hours;
        session.salary = salary;
        session.status = status;

        Ok(SessionClosed {
            date: session.date,
            on_time,
            off_time: now,
            hours,
            salary,
            status,
        })
    }
}
