use crate::models::session::Session;
use crate::utils::date::{date_to_db, timestamp_to_db};
use serde::Serialize;

/// Flat, serializer friendly view of one session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionExport {
    pub date: String,
    pub on_time: String,
    pub off_time: String,
    pub hours: f64,
    pub salary: f64,
    pub status: &'static str,
}

impl From<&Session> for SessionExport {
    fn from(s: &Session) -> Self {
        Self {
            date: date_to_db(s.date),
            on_time: timestamp_to_db(s.on_time),
            off_time: s.off_time.map(timestamp_to_db).unwrap_or_default(),
            hours: s.hours,
            salary: s.salary,
            status: s.status.to_db_str(),
        }
    }
}
