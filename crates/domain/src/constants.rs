//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Event type defaults
pub const DEFAULT_DURATION_MINUTES: u32 = 30;
pub const DEFAULT_EVENT_COLOR: &str = "#3B82F6";
pub const MAX_EVENT_NAME_LENGTH: usize = 120;
pub const MAX_DURATION_MINUTES: i32 = 24 * 60;
pub const MAX_BUFFER_MINUTES: i32 = 12 * 60;

// Slot query bounds
pub const DEFAULT_MAX_RANGE_DAYS: u32 = 7;
pub const DEFAULT_HORIZON_DAYS: u32 = 90;
pub const DEFAULT_UPCOMING_WINDOW_DAYS: u32 = 30;
pub const MAX_CONFIGURABLE_RANGE_DAYS: u32 = 31;

// Hosts
pub const DEFAULT_TIMEZONE: &str = "UTC";

// Guests
pub const MAX_GUEST_NAME_LENGTH: usize = 200;
pub const MAX_NOTES_LENGTH: usize = 4000;
