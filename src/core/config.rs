use crate::config::Config;
use crate::config::migrate::{migrate_config, missing_fields};
use crate::errors::{AppError, AppResult};
use crate::ui::messages::{info, success, warning};
use std::path::Path;
use std::process::Command;

pub struct ConfigLogic;

impl ConfigLogic {
    pub fn print(cfg: &Config) -> AppResult<()> {
        println!("📄 Current configuration:\n");
        println!("{}", serde_yaml::to_string(cfg)?);
        Ok(())
    }

    pub fn check(path: &Path) -> AppResult<()> {
        if !path.exists() {
            warning(format!(
                "No configuration file at {} (defaults in use). Run `init` to create one.",
                path.display()
            ));
            return Ok(());
        }

        let missing = missing_fields(path)?;
        if missing.is_empty() {
            success("Configuration file is complete.");
        } else {
            warning(format!("Missing fields: {}", missing.join(", ")));
            info("Run `config --migrate` to add them with default values.");
        }
        Ok(())
    }

    pub fn migrate(path: &Path) -> AppResult<()> {
        if !path.exists() {
            return Err(AppError::Config(format!(
                "No configuration file at {}",
                path.display()
            )));
        }

        let added = migrate_config(path)?;
        if added.is_empty() {
            success("Configuration already up to date.");
        } else {
            success(format!("Added fields: {}", added.join(", ")));
        }
        Ok(())
    }

    /// Open the file in `editor`, or $EDITOR/$VISUAL, falling back to the
    /// platform default when the requested one fails.
    pub fn edit(path: &Path, editor: Option<&str>) -> AppResult<()> {
        let default_editor = std::env::var("EDITOR")
            .or_else(|_| std::env::var("VISUAL"))
            .unwrap_or_else(|_| {
                if cfg!(target_os = "windows") {
                    "notepad".to_string()
                } else {
                    "nano".to_string()
                }
            });

        let editor_to_use = editor.map(String::from).unwrap_or_else(|| default_editor.clone());

        match Command::new(&editor_to_use).arg(path).status() {
            Ok(s) if s.success() => {
                success(format!("Configuration file edited with '{}'", editor_to_use));
                return Ok(());
            }
            _ => warning(format!(
                "Editor '{}' not available, falling back to '{}'",
                editor_to_use, default_editor
            )),
        }

        match Command::new(&default_editor).arg(path).status() {
            Ok(s) if s.success() => {
                success(format!(
                    "Configuration file edited with fallback '{}'",
                    default_editor
                ));
                Ok(())
            }
            Ok(_) | Err(_) => Err(AppError::Config(format!(
                "Failed to edit configuration file with '{}'",
                default_editor
            ))),
        }
    }
}
