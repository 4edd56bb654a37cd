use crate::errors::{AppError, AppResult, AttendanceError};
use crate::models::month_summary::{MonthKey, MonthSummary};
use crate::models::session::Session;
use crate::models::session_status::SessionStatus;
use crate::models::user::User;
use crate::utils::date::{date_to_db, timestamp_to_db};
use crate::utils::time::parse_timestamp;
use chrono::{Local, NaiveDate};
use rusqlite::{Connection, OptionalExtension, Result, Row, params};

/// Profile fields of a member about to be registered.
#[derive(Debug, Clone)]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub display_name: &'a str,
    pub position: &'a str,
    pub rank: &'a str,
    pub salary_rate: f64,
}

/// Map a `users` row to a `User` with an empty ledger.
pub fn map_user_row(row: &Row) -> Result<User> {
    Ok(User {
        id: row.get("id")?,
        username: row.get("username")?,
        display_name: row.get("display_name")?,
        position: row.get("position")?,
        rank: row.get("rank")?,
        salary_rate: row.get("salary_rate")?,
        career_total: row.get("career_total")?,
        attendance: Vec::new(),
        monthly_history: Vec::new(),
        created_at: row.get("created_at")?,
    })
}

/// A `sessions` row as stored, before timestamps are interpreted.
struct RawSession {
    date: String,
    on_time: String,
    off_time: Option<String>,
    hours: f64,
    salary: f64,
    status: String,
}

impl RawSession {
    fn from_row(row: &Row) -> Result<Self> {
        Ok(Self {
            date: row.get("date")?,
            on_time: row.get("on_time")?,
            off_time: row.get("off_time")?,
            hours: row.get("hours")?,
            salary: row.get("salary")?,
            status: row.get("status")?,
        })
    }

    fn into_session(self) -> AppResult<Session> {
        let date = NaiveDate::parse_from_str(&self.date, "%Y-%m-%d")
            .map_err(|_| AttendanceError::InvalidTimestamp(self.date.clone()))?;

        let on_time = parse_timestamp(&self.on_time)
            .ok_or_else(|| AttendanceError::InvalidTimestamp(self.on_time.clone()))?;

        let off_time = match self.off_time.as_deref() {
            Some(raw) => Some(
                parse_timestamp(raw)
                    .ok_or_else(|| AttendanceError::InvalidTimestamp(raw.to_string()))?,
            ),
            None => None,
        };

        // An open row is always OnDuty, whatever was stored.
        let status = match off_time {
            None => SessionStatus::OnDuty,
            Some(_) => SessionStatus::from_db_str(&self.status).ok_or_else(|| {
                AppError::InvalidInput(format!("Unknown session status '{}'", self.status))
            })?,
        };

        Ok(Session {
            date,
            on_time,
            off_time,
            hours: self.hours,
            salary: self.salary,
            status,
        })
    }
}

pub fn insert_user(conn: &Connection, new: &NewUser) -> AppResult<i64> {
    conn.execute(
        "INSERT INTO users (username, display_name, position, rank, salary_rate, career_total, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, 0, ?6)",
        params![
            new.username,
            new.display_name,
            new.position,
            new.rank,
            new.salary_rate,
            Local::now().to_rfc3339(),
        ],
    )?;
    Ok(conn.last_insert_rowid())
}

pub fn find_user_id_by_username(conn: &Connection, username: &str) -> AppResult<Option<i64>> {
    let id = conn
        .query_row(
            "SELECT id FROM users WHERE username = ?1",
            [username],
            |row| row.get(0),
        )
        .optional()?;
    Ok(id)
}

/// Display names of every user except `except_id`.
pub fn other_display_names(conn: &Connection, except_id: i64) -> AppResult<Vec<String>> {
    let mut stmt = conn.prepare("SELECT display_name FROM users WHERE id <> ?1")?;
    let rows = stmt.query_map([except_id], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn update_display_name(conn: &Connection, user_id: i64, name: &str) -> AppResult<()> {
    let n = conn.execute(
        "UPDATE users SET display_name = ?1 WHERE id = ?2",
        params![name, user_id],
    )?;
    if n == 0 {
        return Err(AppError::UserNotFound(user_id));
    }
    Ok(())
}

/// All members without their ledgers, ordered by id.
pub fn list_users(conn: &Connection) -> AppResult<Vec<User>> {
    let mut stmt = conn.prepare("SELECT * FROM users ORDER BY id ASC")?;
    let rows = stmt.query_map([], map_user_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Ids of members with an open session.
pub fn on_duty_user_ids(conn: &Connection) -> AppResult<Vec<i64>> {
    let mut stmt = conn.prepare("SELECT user_id FROM sessions WHERE off_time IS NULL")?;
    let rows = stmt.query_map([], |row| row.get(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

pub fn load_sessions(conn: &Connection, user_id: i64) -> AppResult<Vec<Session>> {
    let mut stmt = conn.prepare_cached(
        "SELECT date, on_time, off_time, hours, salary, status
         FROM sessions
         WHERE user_id = ?1
         ORDER BY seq ASC",
    )?;

    let rows = stmt.query_map([user_id], RawSession::from_row)?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?.into_session()?);
    }
    Ok(out)
}

pub fn load_monthly_history(conn: &Connection, user_id: i64) -> AppResult<Vec<MonthSummary>> {
    let mut stmt = conn.prepare_cached(
        "SELECT month, hours, salary
         FROM monthly_history
         WHERE user_id = ?1
         ORDER BY ord ASC",
    )?;

    let rows = stmt.query_map([user_id], |row| {
        Ok((
            row.get::<_, String>(0)?,
            row.get::<_, f64>(1)?,
            row.get::<_, f64>(2)?,
        ))
    })?;

    let mut out = Vec::new();
    for r in rows {
        let (month, hours, salary) = r?;
        out.push(MonthSummary {
            month: month.parse::<MonthKey>()?,
            hours,
            salary,
        });
    }
    Ok(out)
}

/// Load the full record of one member (profile + ledger), as stored.
pub fn load_user(conn: &Connection, user_id: i64) -> AppResult<User> {
    let mut user = conn
        .query_row("SELECT * FROM users WHERE id = ?1", [user_id], map_user_row)
        .optional()?
        .ok_or(AppError::UserNotFound(user_id))?;

    user.attendance = load_sessions(conn, user_id)?;
    user.monthly_history = load_monthly_history(conn, user_id)?;
    Ok(user)
}

/// Write back the whole record. Call inside a transaction.
pub fn save_user(conn: &Connection, user: &User) -> AppResult<()> {
    let n = conn.execute(
        "UPDATE users
         SET display_name = ?1, position = ?2, rank = ?3,
             salary_rate = ?4, career_total = ?5
         WHERE id = ?6",
        params![
            user.display_name,
            user.position,
            user.rank,
            user.salary_rate,
            user.career_total,
            user.id,
        ],
    )?;
    if n == 0 {
        return Err(AppError::UserNotFound(user.id));
    }

    {
        let mut upsert = conn.prepare_cached(
            "INSERT INTO sessions (user_id, seq, date, on_time, off_time, hours, salary, status)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
             ON CONFLICT(user_id, seq) DO UPDATE SET
                 date = excluded.date,
                 on_time = excluded.on_time,
                 off_time = excluded.off_time,
                 hours = excluded.hours,
                 salary = excluded.salary,
                 status = excluded.status",
        )?;

        for (seq, s) in user.attendance.iter().enumerate() {
            upsert.execute(params![
                user.id,
                seq as i64,
                date_to_db(s.date),
                timestamp_to_db(s.on_time),
                s.off_time.map(timestamp_to_db),
                s.hours,
                s.salary,
                s.status.to_db_str(),
            ])?;
        }
    }

    conn.execute(
        "DELETE FROM sessions WHERE user_id = ?1 AND seq >= ?2",
        params![user.id, user.attendance.len() as i64],
    )?;

    conn.execute(
        "DELETE FROM monthly_history WHERE user_id = ?1",
        [user.id],
    )?;

    let mut insert = conn.prepare_cached(
        "INSERT INTO monthly_history (user_id, month, ord, hours, salary)
         VALUES (?1, ?2, ?3, ?4, ?5)",
    )?;
    for (ord, m) in user.monthly_history.iter().enumerate() {
        insert.execute(params![
            user.id,
            m.month.to_string(),
            ord as i64,
            m.hours,
            m.salary,
        ])?;
    }

    Ok(())
}
