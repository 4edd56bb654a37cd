pub mod config;
pub mod db;
pub mod duty;
pub mod export;
pub mod init;
pub mod log;
pub mod rates;
pub mod user;

use crate::config::Config;
use crate::db::initialize::init_db;
use crate::db::pool::DbPool;
use crate::errors::AppResult;

/// Open the configured database and bring its schema up to date.
pub(crate) fn open_db(cfg: &Config) -> AppResult<DbPool> {
    let pool = DbPool::new(&cfg.database)?;
    init_db(&pool.conn)?;
    Ok(pool)
}
