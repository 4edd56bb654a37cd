use crate::config::Config;
use crate::db::pool::DbPool;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use crate::utils::format_money;
use rusqlite::OptionalExtension;
use std::fs;

pub fn print_db_info(pool: &mut DbPool, cfg: &Config) -> rusqlite::Result<()> {
    let db_path = &cfg.database;
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) COUNTS
    //
    let members: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))?;
    let sessions: i64 = pool
        .conn
        .query_row("SELECT COUNT(*) FROM sessions", [], |row| row.get(0))?;
    let on_duty: i64 = pool.conn.query_row(
        "SELECT COUNT(*) FROM sessions WHERE off_time IS NULL",
        [],
        |row| row.get(0),
    )?;

    println!("{}• Members:{} {}{}{}", CYAN, RESET, GREEN, members, RESET);
    println!("{}• Sessions:{} {}{}{}", CYAN, RESET, GREEN, sessions, RESET);
    println!("{}• On duty now:{} {}{}{}", CYAN, RESET, GREEN, on_duty, RESET);

    //
    // 3) DATE RANGE
    //
    let range: Option<(Option<String>, Option<String>)> = pool
        .conn
        .query_row("SELECT MIN(date), MAX(date) FROM sessions", [], |row| {
            Ok((row.get(0)?, row.get(1)?))
        })
        .optional()?;

    let (first, last) = range.unwrap_or((None, None));
    let fmt = |d: Option<String>| d.unwrap_or_else(|| format!("{GREY}--{RESET}"));

    println!("{}• Date range:{}", CYAN, RESET);
    println!("    from: {}", fmt(first));
    println!("    to:   {}", fmt(last));

    //
    // 4) PAYROLL
    //
    let payroll: f64 = pool.conn.query_row(
        "SELECT IFNULL(SUM(career_total), 0) FROM users",
        [],
        |row| row.get(0),
    )?;
    println!(
        "{}• Total payroll:{} {}",
        CYAN,
        RESET,
        format_money(payroll, &cfg.thousands_separator)
    );

    println!();
    Ok(())
}
