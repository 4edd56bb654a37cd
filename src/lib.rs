//! rDutyLog library root.
//! Exposes the CLI parser, the attendance & payroll engine, and the
//! SQLite-backed storage it runs on.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use crate::core::clock::{Clock, FixedClock, SystemClock};
use errors::{AppError, AppResult};

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config, clock: &dyn Clock) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli),
        Commands::Config { .. } => cli::commands::config::handle(&cli.command, cfg),
        Commands::Db { .. } => cli::commands::db::handle(&cli.command, cfg),
        Commands::Log { .. } => cli::commands::log::handle(&cli.command, cfg),
        Commands::Rates => cli::commands::rates::handle(cfg),
        Commands::User { action } => cli::commands::user::handle(action, cfg),
        Commands::On { .. }
        | Commands::Off { .. }
        | Commands::Status { .. }
        | Commands::Month { .. }
        | Commands::History { .. } => cli::commands::duty::handle(&cli.command, cfg, clock),
        Commands::Export { .. } => cli::commands::export::handle(&cli.command, cfg),
    }
}

/// `--now` pins the clock; otherwise the configured offset or system local time.
fn build_clock(cli: &Cli, cfg: &Config) -> AppResult<Box<dyn Clock>> {
    if let Some(raw) = &cli.now {
        let ts = utils::time::parse_timestamp(raw)
            .ok_or_else(|| AppError::InvalidInput(format!("Invalid --now timestamp '{}'", raw)))?;
        return Ok(Box::new(FixedClock(ts)));
    }

    let offset = cfg
        .utc_offset
        .as_deref()
        .map(utils::time::parse_utc_offset)
        .transpose()?;
    Ok(Box::new(SystemClock::new(offset)))
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    // 1️⃣ parse CLI
    let cli = Cli::parse();

    // 2️⃣ load config once
    let mut cfg = Config::load()?;

    // 3️⃣ command-line DB override
    if let Some(custom_db) = &cli.db {
        cfg.database = Config::resolve_database(custom_db)
            .to_string_lossy()
            .to_string();
    }

    // 4️⃣ clock + dispatch
    let clock = build_clock(&cli, &cfg)?;
    dispatch(&cli, &cfg, clock.as_ref())
}
