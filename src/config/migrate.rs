//! Configuration file upgrades: detect keys missing from an older config
//! file and fill them with defaults, never touching values the user set.

use super::Config;
use crate::errors::{AppError, AppResult};
use serde_yaml::{Mapping, Value};
use std::fs;
use std::path::Path;

/// Every top-level key a current config file carries, with its default value.
fn default_mapping(database: &str) -> AppResult<Mapping> {
    let defaults = Config {
        database: database.to_string(),
        ..Config::default()
    };

    match serde_yaml::to_value(&defaults)? {
        Value::Mapping(map) => Ok(map),
        _ => Err(AppError::Config(
            "default configuration is not a mapping".into(),
        )),
    }
}

fn read_mapping(path: &Path) -> AppResult<Mapping> {
    let content = fs::read_to_string(path)?;
    match serde_yaml::from_str::<Value>(&content)? {
        Value::Mapping(map) => Ok(map),
        Value::Null => Ok(Mapping::new()),
        _ => Err(AppError::Config(format!(
            "{} does not contain a YAML mapping",
            path.display()
        ))),
    }
}

/// Keys present in the current schema but absent from the file at `path`.
pub fn missing_fields(path: &Path) -> AppResult<Vec<String>> {
    let current = read_mapping(path)?;
    let defaults = default_mapping("")?;

    Ok(defaults
        .keys()
        .filter(|k| !current.contains_key(*k))
        .filter_map(|k| k.as_str().map(String::from))
        .collect())
}

/// Add the missing keys with their defaults.
///   Returns:
///   Ok(added) → names of the keys that were written (empty when up to date)
pub fn migrate_config(path: &Path) -> AppResult<Vec<String>> {
    let mut current = read_mapping(path)?;

    let database = current
        .get("database")
        .and_then(Value::as_str)
        .map(String::from)
        .unwrap_or_else(|| Config::database_file().to_string_lossy().to_string());

    let mut added = Vec::new();
    for (key, value) in default_mapping(&database)? {
        if !current.contains_key(&key) {
            if let Some(name) = key.as_str() {
                added.push(name.to_string());
            }
            current.insert(key, value);
        }
    }

    if !added.is_empty() {
        let serialized = serde_yaml::to_string(&Value::Mapping(current))?;
        fs::write(path, serialized)?;
    }

    Ok(added)
}
