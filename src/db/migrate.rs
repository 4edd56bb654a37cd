use crate::ui::messages::success;
use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists with the modern schema.
/// Applied migrations are recorded there as `migration_applied` rows.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20251119_0001_create_users",
        description: "Created users table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS users (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            username      TEXT NOT NULL UNIQUE,
            display_name  TEXT NOT NULL,
            position      TEXT NOT NULL DEFAULT '',
            rank          TEXT NOT NULL DEFAULT '',
            salary_rate   REAL NOT NULL,
            career_total  REAL NOT NULL DEFAULT 0,
            created_at    TEXT NOT NULL
        );
        "#,
    },
    Migration {
        version: "20251119_0002_create_sessions",
        description: "Created sessions table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS sessions (
            user_id   INTEGER NOT NULL REFERENCES users(id),
            seq       INTEGER NOT NULL,
            date      TEXT NOT NULL,
            on_time   TEXT NOT NULL,
            off_time  TEXT,
            hours     REAL NOT NULL DEFAULT 0,
            salary    REAL NOT NULL DEFAULT 0,
            status    TEXT NOT NULL DEFAULT 'on_duty'
                      CHECK(status IN ('on_duty','forfeited','completed','capped_out')),
            PRIMARY KEY (user_id, seq)
        );

        CREATE INDEX IF NOT EXISTS idx_sessions_user_date ON sessions(user_id, date);
        "#,
    },
    Migration {
        version: "20251119_0003_create_monthly_history",
        description: "Created monthly_history table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS monthly_history (
            user_id  INTEGER NOT NULL REFERENCES users(id),
            month    TEXT NOT NULL,
            ord      INTEGER NOT NULL,
            hours    REAL NOT NULL DEFAULT 0,
            salary   REAL NOT NULL DEFAULT 0,
            PRIMARY KEY (user_id, month)
        );
        "#,
    },
    Migration {
        version: "20251126_0004_single_open_session",
        description: "Enforced at most one open session per user",
        sql: r#"
        CREATE UNIQUE INDEX IF NOT EXISTS idx_sessions_one_open
            ON sessions(user_id) WHERE off_time IS NULL;
        "#,
    },
];

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

fn apply(conn: &Connection, m: &Migration) -> Result<()> {
    let tx = conn.unchecked_transaction()?;

    tx.execute_batch(m.sql)?;
    tx.execute(
        "INSERT INTO log (date, operation, target, message)
         VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
        [m.version, m.description],
    )?;

    tx.commit()?;

    success(format!("Migration applied: {} → {}", m.version, m.description));
    Ok(())
}

/// Public entry point: run all pending migrations, oldest first.
///
/// Invoked by db::init_db().
pub fn run_pending_migrations(conn: &Connection) -> Result<()> {
    ensure_log_table(conn)?;

    for m in MIGRATIONS {
        if !is_applied(conn, m.version)? {
            apply(conn, m)?;
        }
    }

    Ok(())
}

/// Versions not yet recorded as applied.
pub fn pending_migrations(conn: &Connection) -> Result<Vec<&'static str>> {
    ensure_log_table(conn)?;

    let mut out = Vec::new();
    for m in MIGRATIONS {
        if !is_applied(conn, m.version)? {
            out.push(m.version);
        }
    }
    Ok(out)
}
