//! # Schedulr Domain
//!
//! Business domain types and models for Schedulr.
//!
//! This crate contains:
//! - Scheduling entities (Host, AvailabilityRule, EventType, Booking, Slot)
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Domain constants
//!
//! ## Architecture
//! - No dependencies on other Schedulr crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod macros;
pub mod types;
pub mod utils;

// Re-export commonly used items
pub use config::*;
pub use errors::*;
pub use types::*;
pub use utils::email::is_plausible_email;
pub use utils::timezone::parse_timezone;
pub use utils::wall_clock::{format_wall_clock, parse_wall_clock};
