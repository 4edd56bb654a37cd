use crate::db::migrate::run_pending_migrations;
use crate::errors::{AppError, AppResult};
use rusqlite::Connection;

const REQUIRED_TABLES: [&str; 4] = ["users", "sessions", "monthly_history", "log"];

/// Bring the schema up to date, then make sure every table the engine
/// reads from is there.
pub fn init_db(conn: &Connection) -> AppResult<()> {
    run_pending_migrations(conn)?;

    for table in REQUIRED_TABLES {
        let found: i64 = conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = ?1",
            [table],
            |row| row.get(0),
        )?;
        if found == 0 {
            return Err(AppError::Migration(format!("table '{}' is missing", table)));
        }
    }
    Ok(())
}
