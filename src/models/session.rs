use super::session_status::SessionStatus;
use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;

/// One duty interval. Created by check-in, closed exactly once by check-off.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Session {
    pub date: NaiveDate,                  // ⇔ sessions.date (TEXT "YYYY-MM-DD")
    pub on_time: NaiveDateTime,           // ⇔ sessions.on_time (TEXT "YYYY-MM-DD HH:MM:SS")
    pub off_time: Option<NaiveDateTime>,  // ⇔ sessions.off_time (NULL while open)
    pub hours: f64,                       // credited hours, 0 while open
    pub salary: f64,                      // wage earned, 0 while open
    pub status: SessionStatus,
}

impl Session {
    /// A fresh OnDuty session opened at `now`.
    pub fn open(now: NaiveDateTime) -> Self {
        Self {
            date: now.date(),
            on_time: now,
            off_time: None,
            hours: 0.0,
            salary: 0.0,
            status: SessionStatus::OnDuty,
        }
    }

    pub fn is_open(&self) -> bool {
        self.off_time.is_none()
    }

    pub fn is_closed(&self) -> bool {
        self.off_time.is_some()
    }

    pub fn on_time_str(&self) -> String {
        self.on_time.format("%H:%M:%S").to_string()
    }

    pub fn off_time_str(&self) -> String {
        self.off_time
            .map(|t| t.format("%H:%M:%S").to_string())
            .unwrap_or_else(|| "--:--:--".to_string())
    }
}
