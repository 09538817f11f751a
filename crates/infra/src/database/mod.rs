//! SQLite implementations of the core storage ports

mod columns;

pub mod availability_repository;
pub mod booking_repository;
pub mod event_type_repository;
pub mod host_repository;
pub mod manager;

pub use availability_repository::SqliteAvailabilityRepository;
pub use booking_repository::SqliteBookingRepository;
pub use event_type_repository::SqliteEventTypeRepository;
pub use host_repository::SqliteHostRepository;
pub use manager::{DbManager, SqliteConnection};
