use crate::cli::commands::open_db;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::log::LogLogic;
use crate::errors::AppResult;
use crate::ui::messages::info;

/// Handle `log --print`
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    match cmd {
        Commands::Log { print: true } => {
            let mut pool = open_db(cfg)?;
            LogLogic::print_log(&mut pool)
        }
        _ => {
            info("Nothing to do: use `log --print` to show the audit log.");
            Ok(())
        }
    }
}
