use crate::cli::commands::open_db;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log;
use crate::db::store::SqliteUserStore;
use crate::errors::AppResult;
use crate::export::ExportLogic;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        user,
        format,
        file,
        force,
    } = cmd
    {
        let mut pool = open_db(cfg)?;

        let rows = {
            let mut store = SqliteUserStore::new(&mut pool.conn, cfg.default_rate);
            ExportLogic::export_sessions(&mut store, *user, *format, file, *force)?
        };

        log::audit(
            &pool.conn,
            "export",
            &user.to_string(),
            &format!("{} session(s) → {} ({})", rows, file, format.as_str()),
        );
    }
    Ok(())
}
