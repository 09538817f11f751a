//! IANA timezone parsing

use chrono_tz::Tz;

use crate::errors::{Result, SchedulrError};

/// Parse an IANA timezone identifier such as `Europe/Berlin`.
///
/// # Errors
/// Returns `SchedulrError::Validation` for unknown identifiers.
pub fn parse_timezone(name: &str) -> Result<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| SchedulrError::Validation(format!("unknown timezone: {name}")))
}
