//! Wall-clock (`HH:MM`) time handling
//!
//! Availability windows are entered as local wall-clock times with minute
//! granularity. Seconds are accepted on input (`HH:MM:SS`) but must be zero.

use chrono::{NaiveTime, Timelike};

use crate::errors::{Result, SchedulrError};

/// Parse `HH:MM` or `HH:MM:00` into a minute-granular [`NaiveTime`].
///
/// # Errors
/// Returns `SchedulrError::Validation` for malformed values or non-zero
/// seconds.
pub fn parse_wall_clock(value: &str) -> Result<NaiveTime> {
    let value = value.trim();
    let parsed = NaiveTime::parse_from_str(value, "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(value, "%H:%M:%S"))
        .map_err(|_| SchedulrError::Validation(format!("invalid time format: {value}")))?;

    if parsed.second() != 0 || parsed.nanosecond() != 0 {
        return Err(SchedulrError::Validation(format!(
            "times must be minute-granular: {value}"
        )));
    }

    Ok(parsed)
}

/// Render a wall-clock time as `HH:MM`.
pub fn format_wall_clock(time: NaiveTime) -> String {
    time.format("%H:%M").to_string()
}

/// Serde adapter storing [`NaiveTime`] as `HH:MM`.
pub mod hhmm {
    use chrono::NaiveTime;
    use serde::{Deserialize, Deserializer, Serializer};

    /// Serialize as `HH:MM`.
    ///
    /// # Errors
    /// Propagates serializer errors.
    pub fn serialize<S: Serializer>(time: &NaiveTime, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&super::format_wall_clock(*time))
    }

    /// Deserialize from `HH:MM` or `HH:MM:SS`.
    ///
    /// # Errors
    /// Fails on malformed input.
    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<NaiveTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        super::parse_wall_clock(&raw).map_err(serde::de::Error::custom)
    }
}
