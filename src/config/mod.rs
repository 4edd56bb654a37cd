use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::env;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

pub mod migrate; // use submodule at src/config/migrate.rs

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub database: String,
    #[serde(default = "default_daily_cap")]
    pub daily_cap_hours: f64,
    #[serde(default = "default_min_session")]
    pub min_session_minutes: i64,
    #[serde(default = "default_rate")]
    pub default_rate: f64,
    #[serde(default = "default_positions")]
    pub positions: BTreeMap<String, f64>,
    #[serde(default = "default_ranks")]
    pub ranks: Vec<String>,
    #[serde(default)]
    pub utc_offset: Option<String>,
    #[serde(default = "default_date_format")]
    pub date_format: String,
    #[serde(default = "default_thousands_separator")]
    pub thousands_separator: String,
    #[serde(default = "default_separator_char")]
    pub separator_char: String,
}

fn default_daily_cap() -> f64 {
    4.0
}
fn default_min_session() -> i64 {
    60
}
fn default_rate() -> f64 {
    10714.0
}
fn default_positions() -> BTreeMap<String, f64> {
    [
        ("Director", 50000.0),
        ("Deputy Director", 50000.0),
        ("Assistant", 25000.0),
        ("Secretary", 21500.0),
        ("Department Head", 18000.0),
        ("Deputy Department Head", 14500.0),
        ("Officer", 10714.0),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v))
    .collect()
}
fn default_ranks() -> Vec<String> {
    [
        "Corporal",
        "Sergeant",
        "Staff Sergeant",
        "Second Lieutenant",
        "First Lieutenant",
        "Senior Lieutenant",
        "Captain",
        "Major",
        "Lieutenant Colonel",
        "Colonel",
        "Senior Colonel",
    ]
    .into_iter()
    .map(String::from)
    .collect()
}
fn default_date_format() -> String {
    "%d/%m/%Y".to_string()
}
fn default_thousands_separator() -> String {
    ",".to_string()
}
fn default_separator_char() -> String {
    "-".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self::with_database(Self::database_file().to_string_lossy().to_string())
    }
}

impl Config {
    fn with_database(database: String) -> Self {
        Self {
            database,
            daily_cap_hours: default_daily_cap(),
            min_session_minutes: default_min_session(),
            default_rate: default_rate(),
            positions: default_positions(),
            ranks: default_ranks(),
            utc_offset: None,
            date_format: default_date_format(),
            thousands_separator: default_thousands_separator(),
            separator_char: default_separator_char(),
        }
    }

    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            let appdata = env::var("APPDATA").unwrap_or_else(|_| ".".to_string());
            PathBuf::from(appdata).join("rdutylog")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".rdutylog")
        }
    }

    /// Return the full path of the config file
    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rdutylog.conf")
    }

    /// Return the full path of the SQLite database
    pub fn database_file() -> PathBuf {
        Self::config_dir().join("rdutylog.sqlite")
    }

    /// Resolve a user supplied DB path: `~` is expanded and relative names
    /// land inside the config directory.
    pub fn resolve_database(name: &str) -> PathBuf {
        let p = crate::utils::path::expand_tilde(name);
        if p.is_absolute() {
            p
        } else {
            Self::config_dir().join(p)
        }
    }

    /// Load configuration from file, or return defaults if not found
    pub fn load() -> AppResult<Self> {
        let path = Self::config_file();

        if path.exists() {
            let content = fs::read_to_string(&path)?;
            let cfg: Config = serde_yaml::from_str(&content)?;
            cfg.validate()?;
            Ok(cfg)
        } else {
            Ok(Config::default())
        }
    }

    /// Reject values the engine cannot work with.
    pub fn validate(&self) -> AppResult<()> {
        if !(self.daily_cap_hours.is_finite() && self.daily_cap_hours > 0.0) {
            return Err(AppError::Config(format!(
                "daily_cap_hours must be positive, got {}",
                self.daily_cap_hours
            )));
        }
        if self.min_session_minutes < 0 {
            return Err(AppError::Config(format!(
                "min_session_minutes must not be negative, got {}",
                self.min_session_minutes
            )));
        }
        if !(self.default_rate.is_finite() && self.default_rate > 0.0) {
            return Err(AppError::Config(format!(
                "default_rate must be positive, got {}",
                self.default_rate
            )));
        }
        if let Some((pos, rate)) = self
            .positions
            .iter()
            .find(|(_, r)| !(r.is_finite() && **r > 0.0))
        {
            return Err(AppError::Config(format!(
                "rate for position '{}' must be positive, got {}",
                pos, rate
            )));
        }
        if let Some(off) = &self.utc_offset {
            crate::utils::time::parse_utc_offset(off)?;
        }
        if !crate::utils::date::is_valid_pattern(&self.date_format) {
            return Err(AppError::Config(format!(
                "date_format '{}' is not a valid strftime pattern",
                self.date_format
            )));
        }
        Ok(())
    }

    /// Initialize configuration and database files
    pub fn init_all(custom_name: Option<String>, is_test: bool) -> AppResult<PathBuf> {
        let dir = Self::config_dir();
        fs::create_dir_all(&dir)?;

        // DB name: user provided or default
        let db_path = match custom_name {
            Some(name) => Self::resolve_database(&name),
            None => Self::database_file(),
        };

        let config = Config::with_database(db_path.to_string_lossy().to_string());

        // Write config file
        if !is_test {
            let yaml = serde_yaml::to_string(&config)?;
            let mut file = fs::File::create(Self::config_file())?;
            file.write_all(yaml.as_bytes())?;
        }

        // Create empty DB file if not exists
        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }
        if !db_path.exists() {
            fs::File::create(&db_path)?;
        }

        Ok(db_path)
    }
}
