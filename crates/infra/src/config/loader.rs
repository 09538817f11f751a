//! Configuration loader
//!
//! Loads application configuration from environment variables or files.
//!
//! ## Loading Strategy
//! 1. First, attempts to load from environment variables
//! 2. If `SCHEDULR_DB_PATH` is not set, falls back to loading from file
//! 3. Probes multiple paths for config files
//! 4. Supports JSON and TOML formats
//!
//! Whatever the source, the result is checked with [`Config::validate`].
//!
//! ## Environment Variables
//! - `SCHEDULR_DB_PATH`: Database file path (required for env loading)
//! - `SCHEDULR_DB_POOL_SIZE`: Connection pool size
//! - `SCHEDULR_MAX_RANGE_DAYS`: Longest slot query in days
//! - `SCHEDULR_HORIZON_DAYS`: How far ahead slots may be booked
//! - `SCHEDULR_UPCOMING_WINDOW_DAYS`: Window of the upcoming listing
//! - `SCHEDULR_DEFAULT_TIMEZONE`: Timezone for hosts registered without one
//! - `SCHEDULR_LOG_JSON`: Emit JSON logs (true/false)
//!
//! ## File Locations
//! The loader probes the following paths (in order):
//! 1. `./schedulr.{toml,json}` or `./config.{toml,json}`
//! 2. The same names in the parent and grandparent directory
//! 3. The same names next to the executable

use std::path::{Path, PathBuf};
use std::str::FromStr;

use schedulr_domain::{Config, DatabaseConfig, LoggingConfig, Result, SchedulingConfig, SchedulrError};

const CONFIG_FILE_NAMES: [&str; 4] = ["schedulr.toml", "schedulr.json", "config.toml", "config.json"];

/// Load configuration with automatic fallback strategy
///
/// # Errors
/// Returns `SchedulrError::Config` if neither source yields a valid
/// configuration.
pub fn load() -> Result<Config> {
    let config = match load_from_env() {
        Ok(config) => {
            tracing::info!("Configuration loaded from environment variables");
            config
        }
        Err(e) => {
            tracing::debug!(error = ?e, "Failed to load from environment, trying file");
            load_from_file(None)?
        }
    };

    config.validate()?;
    Ok(config)
}

/// Load configuration from environment variables
///
/// Only `SCHEDULR_DB_PATH` is required; every other setting falls back to
/// its default.
///
/// # Errors
/// Returns `SchedulrError::Config` if the database path is missing or a
/// numeric variable does not parse.
pub fn load_from_env() -> Result<Config> {
    let defaults = Config::default();

    Ok(Config {
        database: DatabaseConfig {
            path: env_var("SCHEDULR_DB_PATH")?,
            pool_size: env_parse("SCHEDULR_DB_POOL_SIZE", defaults.database.pool_size)?,
        },
        scheduling: SchedulingConfig {
            max_range_days: env_parse(
                "SCHEDULR_MAX_RANGE_DAYS",
                defaults.scheduling.max_range_days,
            )?,
            horizon_days: env_parse("SCHEDULR_HORIZON_DAYS", defaults.scheduling.horizon_days)?,
            upcoming_window_days: env_parse(
                "SCHEDULR_UPCOMING_WINDOW_DAYS",
                defaults.scheduling.upcoming_window_days,
            )?,
            default_timezone: std::env::var("SCHEDULR_DEFAULT_TIMEZONE")
                .unwrap_or(defaults.scheduling.default_timezone),
        },
        logging: LoggingConfig { json: env_bool("SCHEDULR_LOG_JSON", defaults.logging.json) },
    })
}

/// Load configuration from a file
///
/// If `path` is `None`, probes multiple locations for config files.
/// Supports both JSON and TOML formats (detected by file extension).
///
/// # Errors
/// Returns `SchedulrError::Config` if the file is missing or malformed.
pub fn load_from_file(path: Option<PathBuf>) -> Result<Config> {
    let config_path = match path {
        Some(p) => {
            if !p.exists() {
                return Err(SchedulrError::Config(format!(
                    "Config file not found: {}",
                    p.display()
                )));
            }
            p
        }
        None => probe_config_paths().ok_or_else(|| {
            SchedulrError::Config("No config file found in any of the standard locations".into())
        })?,
    };

    tracing::info!(path = %config_path.display(), "Loading configuration from file");

    let contents = std::fs::read_to_string(&config_path)
        .map_err(|e| SchedulrError::Config(format!("Failed to read config file: {e}")))?;

    parse_config(&contents, &config_path)
}

/// Parse configuration from string content, format chosen by extension.
fn parse_config(contents: &str, path: &Path) -> Result<Config> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("json");

    match extension {
        "toml" => toml::from_str(contents)
            .map_err(|e| SchedulrError::Config(format!("Invalid TOML format: {e}"))),
        "json" => serde_json::from_str(contents)
            .map_err(|e| SchedulrError::Config(format!("Invalid JSON format: {e}"))),
        _ => Err(SchedulrError::Config(format!("Unsupported config format: {extension}"))),
    }
}

/// First existing config file among the standard locations, if any.
pub fn probe_config_paths() -> Option<PathBuf> {
    let mut roots = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        roots.extend([cwd.clone(), cwd.join(".."), cwd.join("../..")]);
    }
    if let Ok(exe_path) = std::env::current_exe() {
        if let Some(exe_dir) = exe_path.parent() {
            roots.push(exe_dir.to_path_buf());
        }
    }

    roots
        .iter()
        .flat_map(|root| CONFIG_FILE_NAMES.iter().map(move |name| root.join(name)))
        .find(|path| path.exists())
}

fn env_var(key: &str) -> Result<String> {
    std::env::var(key)
        .map_err(|_| SchedulrError::Config(format!("Missing required environment variable: {key}")))
}

/// Parse an optional numeric variable, `default` when unset.
fn env_parse<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| SchedulrError::Config(format!("Invalid value for {key}: {e}"))),
        Err(_) => Ok(default),
    }
}

/// Accepts `1`/`0`, `true`/`false`, `yes`/`no`, `on`/`off` (case-insensitive)
fn env_bool(key: &str, default: bool) -> bool {
    std::env::var(key)
        .ok()
        .map(|s| matches!(s.to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on"))
        .unwrap_or(default)
}
