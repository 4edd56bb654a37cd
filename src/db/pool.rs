//! Connection handle shared by the command handlers.

use rusqlite::{Connection, Result};
use std::path::Path;
use std::time::Duration;

/// How long a writer waits for another process holding the write lock.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

pub struct DbPool {
    pub conn: Connection,
}

impl DbPool {
    /// Open `path` with foreign keys enforced. Two `rdutylog` processes may
    /// touch the same file: the second writer waits up to `BUSY_TIMEOUT`.
    pub fn new(path: &str) -> Result<Self> {
        let conn = Connection::open(Path::new(path))?;
        conn.busy_timeout(BUSY_TIMEOUT)?;
        conn.pragma_update(None, "foreign_keys", "ON")?;
        Ok(Self { conn })
    }
}
