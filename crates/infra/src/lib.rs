//! # Schedulr Infrastructure
//!
//! Infrastructure implementations of core domain ports.
//!
//! This crate contains:
//! - SQLite repositories for hosts, availability, event types and bookings
//! - Configuration loading from environment variables and files
//! - Notification and meeting-link adapters
//!
//! ## Architecture
//! - Implements traits defined in `schedulr-core`
//! - Contains all "impure" code (I/O, randomness)

pub mod config;
pub mod database;
pub mod errors;
pub mod notifications;

// Re-export commonly used items
pub use database::{
    DbManager, SqliteAvailabilityRepository, SqliteBookingRepository, SqliteEventTypeRepository,
    SqliteHostRepository,
};
pub use errors::InfraError;
pub use notifications::{GeneratedMeetingLinkProvisioner, LoggingNotifier};
