//! Configuration management

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_HORIZON_DAYS, DEFAULT_MAX_RANGE_DAYS, DEFAULT_TIMEZONE, DEFAULT_UPCOMING_WINDOW_DAYS,
    MAX_CONFIGURABLE_RANGE_DAYS,
};
use crate::errors::{Result, SchedulrError};
use crate::utils::timezone::parse_timezone;

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub database: DatabaseConfig,
    pub scheduling: SchedulingConfig,
    pub logging: LoggingConfig,
}

/// Database configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path: String,
    pub pool_size: u32,
}

/// Slot query and booking bounds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulingConfig {
    /// Maximum number of calendar days a single slot query may span.
    pub max_range_days: u32,
    /// How far ahead (in days) slots may be requested or booked.
    pub horizon_days: u32,
    /// Window used by the "upcoming bookings" listing.
    pub upcoming_window_days: u32,
    /// Timezone assigned to hosts registered without one.
    pub default_timezone: String,
}

/// Logging output configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Emit JSON lines instead of human-readable output.
    pub json: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self { path: "schedulr.db".to_string(), pool_size: 8 }
    }
}

impl Default for SchedulingConfig {
    fn default() -> Self {
        Self {
            max_range_days: DEFAULT_MAX_RANGE_DAYS,
            horizon_days: DEFAULT_HORIZON_DAYS,
            upcoming_window_days: DEFAULT_UPCOMING_WINDOW_DAYS,
            default_timezone: DEFAULT_TIMEZONE.to_string(),
        }
    }
}

impl Config {
    /// Check cross-field constraints that serde cannot express.
    ///
    /// # Errors
    /// Returns `SchedulrError::Config` describing the first violated rule.
    pub fn validate(&self) -> Result<()> {
        if self.database.path.trim().is_empty() {
            return Err(SchedulrError::Config("database.path must not be empty".into()));
        }
        if self.database.pool_size == 0 {
            return Err(SchedulrError::Config("database.pool_size must be at least 1".into()));
        }

        let scheduling = &self.scheduling;
        if scheduling.max_range_days == 0 || scheduling.max_range_days > MAX_CONFIGURABLE_RANGE_DAYS
        {
            return Err(SchedulrError::Config(format!(
                "scheduling.max_range_days must be between 1 and {MAX_CONFIGURABLE_RANGE_DAYS}"
            )));
        }
        if scheduling.horizon_days < scheduling.max_range_days {
            return Err(SchedulrError::Config(
                "scheduling.horizon_days must be >= scheduling.max_range_days".into(),
            ));
        }
        if scheduling.upcoming_window_days == 0 {
            return Err(SchedulrError::Config(
                "scheduling.upcoming_window_days must be at least 1".into(),
            ));
        }
        parse_timezone(&scheduling.default_timezone)
            .map_err(|_| SchedulrError::Config(format!(
                "scheduling.default_timezone is not a valid IANA timezone: {}",
                scheduling.default_timezone
            )))?;

        Ok(())
    }
}
