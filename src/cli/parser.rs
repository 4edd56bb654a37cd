use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rDutyLog
/// CLI application to track duty shifts and capped hourly wages with SQLite
#[derive(Parser)]
#[command(
    name = "rdutylog",
    version = env!("CARGO_PKG_VERSION"),
    about = "Duty timekeeping CLI: clock in/out, capped daily wages, monthly and career payroll",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Pin the clock to a local timestamp (YYYY-MM-DD HH:MM[:SS])
    #[arg(global = true, long = "now", hide = true)]
    pub now: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(long = "migrate", help = "Add missing configuration fields with defaults")]
        migrate: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal audit log
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },

    /// Show the position → hourly rate table and the rank list
    Rates,

    /// Manage organization members
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Clock in (start a duty session)
    On {
        #[arg(long = "user", short = 'u', help = "Member id")]
        user: i64,
    },

    /// Clock off (close the open duty session)
    Off {
        #[arg(long = "user", short = 'u', help = "Member id")]
        user: i64,
    },

    /// Show today's duty progress, current month and career totals
    Status {
        #[arg(long = "user", short = 'u', help = "Member id")]
        user: i64,

        #[arg(long = "date", help = "Day to inspect (YYYY-MM-DD, default: today)")]
        date: Option<String>,
    },

    /// Show hours and salary for one month
    Month {
        #[arg(long = "user", short = 'u', help = "Member id")]
        user: i64,

        #[arg(long = "month", help = "Month key MM/YYYY (default: current month)")]
        month: Option<String>,
    },

    /// Show attendance grouped by day, newest first, and the monthly history
    History {
        #[arg(long = "user", short = 'u', help = "Member id")]
        user: i64,
    },

    /// Export a member's sessions
    Export {
        #[arg(long = "user", short = 'u', help = "Member id")]
        user: i64,

        #[arg(long, value_enum, default_value = "csv")]
        format: ExportFormat,

        #[arg(long, value_name = "FILE")]
        file: String,

        #[arg(long, short = 'f', help = "Overwrite an existing file")]
        force: bool,
    },
}

#[derive(Subcommand)]
pub enum UserAction {
    /// Register a new member
    Add {
        #[arg(long)]
        username: String,

        #[arg(long = "name", help = "Display (in-game) name")]
        name: String,

        #[arg(long, help = "Position; sets the hourly rate")]
        position: String,

        #[arg(long)]
        rank: Option<String>,
    },

    /// List all members
    List,

    /// Change a member's display name
    Rename {
        #[arg(long = "user", short = 'u', help = "Member id")]
        user: i64,

        #[arg(long = "name")]
        name: String,
    },
}
