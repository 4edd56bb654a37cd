//! Unified application error type.
//! All modules (db, core, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use std::io;
use thiserror::Error;

/// Expected, recoverable outcomes of the attendance engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AttendanceError {
    #[error("Daily cap reached: no more duty hours can be credited today")]
    CapReached,

    #[error("A duty session is already open")]
    SessionAlreadyOpen,

    #[error("No open duty session to close")]
    NoOpenSession,

    #[error("Invalid session timestamp: {0}")]
    InvalidTimestamp(String),
}

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Attendance engine
    // ---------------------------
    #[error(transparent)]
    Attendance(#[from] AttendanceError),

    // ---------------------------
    // Roster
    // ---------------------------
    #[error("User not found: {0}")]
    UserNotFound(i64),

    #[error("Username already exists: {0}")]
    UserExists(String),

    #[error("Display name already in use: {0}")]
    NameTaken(String),

    #[error("Invalid rank: {0}")]
    InvalidRank(String),

    // ---------------------------
    // Parsing errors
    // ---------------------------
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid month key (expected MM/YYYY): {0}")]
    InvalidMonth(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl AppError {
    /// Returns the engine error carried by this error, if any.
    pub fn attendance(&self) -> Option<&AttendanceError> {
        match self {
            AppError::Attendance(e) => Some(e),
            _ => None,
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;
