//! Error types used throughout the application

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Main error type for Schedulr
///
/// Every variant is a distinct, user-displayable outcome. Callers branch on
/// the variant (for instance re-fetching slots on `SlotNoLongerAvailable`), so
/// nothing here is ever collapsed into a generic failure.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum SchedulrError {
    /// Unknown host, event type or booking.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The event type exists but is not accepting bookings.
    #[error("Not bookable: {0}")]
    NotBookable(String),

    /// Date range exceeds the configured span or horizon, or lies in the past.
    #[error("Out of range: {0}")]
    OutOfRange(String),

    /// Commit-time conflict; the client must re-fetch slots.
    #[error("Slot no longer available: {0}")]
    SlotNoLongerAvailable(String),

    /// Illegal status transition, e.g. cancelling twice.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// Malformed input.
    #[error("Validation error: {0}")]
    Validation(String),

    /// The requester does not own the resource.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl SchedulrError {
    /// Stable label suitable for logs and metrics.
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::NotFound(_) => "not_found",
            Self::NotBookable(_) => "not_bookable",
            Self::OutOfRange(_) => "out_of_range",
            Self::SlotNoLongerAvailable(_) => "slot_no_longer_available",
            Self::InvalidState(_) => "invalid_state",
            Self::Validation(_) => "validation",
            Self::Forbidden(_) => "forbidden",
            Self::Database(_) => "database",
            Self::Config(_) => "config",
            Self::Internal(_) => "internal",
        }
    }

    /// Whether the error was caused by the caller's input rather than by the
    /// system itself.
    pub const fn is_client_error(&self) -> bool {
        !matches!(self, Self::Database(_) | Self::Config(_) | Self::Internal(_))
    }
}

/// Result type alias for Schedulr operations
pub type Result<T> = std::result::Result<T, SchedulrError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_with_type_tag() {
        let err = SchedulrError::SlotNoLongerAvailable("taken".into());
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["type"], "SlotNoLongerAvailable");
        assert_eq!(json["message"], "taken");
    }

    #[test]
    fn kinds_are_distinct_for_client_errors() {
        let errors = [
            SchedulrError::NotFound(String::new()),
            SchedulrError::NotBookable(String::new()),
            SchedulrError::OutOfRange(String::new()),
            SchedulrError::SlotNoLongerAvailable(String::new()),
            SchedulrError::InvalidState(String::new()),
            SchedulrError::Validation(String::new()),
            SchedulrError::Forbidden(String::new()),
        ];

        let mut kinds: Vec<_> = errors.iter().map(SchedulrError::kind).collect();
        kinds.sort_unstable();
        kinds.dedup();
        assert_eq!(kinds.len(), errors.len());
        assert!(errors.iter().all(SchedulrError::is_client_error));
    }

    #[test]
    fn infrastructure_errors_are_not_client_errors() {
        assert!(!SchedulrError::Database("locked".into()).is_client_error());
        assert!(!SchedulrError::Internal("bug".into()).is_client_error());
    }
}
