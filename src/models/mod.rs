pub mod day_summary;
pub mod month_summary;
pub mod session;
pub mod session_status;
pub mod user;
