//! # Schedulr Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains:
//! - Port/adapter interfaces (traits) for storage, clock and post-commit hooks
//! - The slot engine (availability windows → bookable slots)
//! - The booking committer (atomic check-and-insert per owner)
//! - Availability, event type, host and booking services
//!
//! ## Architecture Principles
//! - Only depends on `schedulr-domain`
//! - No database, HTTP, or platform code
//! - All external dependencies via traits
//! - Pure, testable business logic

pub mod availability;
pub mod bookings;
pub mod clock;
pub mod event_types;
pub mod hosts;
pub mod scheduling;

// Re-export specific items to avoid ambiguity
pub use availability::ports::AvailabilityRepository;
pub use availability::AvailabilityService;
pub use bookings::ports::{BookingNotifier, BookingRepository, MeetingLinkProvisioner};
pub use bookings::{BookingCommitter, BookingService, PostCommitDispatcher};
pub use clock::{Clock, FixedClock, SystemClock};
pub use event_types::ports::EventTypeRepository;
pub use event_types::EventTypeService;
pub use hosts::ports::HostRepository;
pub use hosts::{HostProfileUpdate, HostService, NewHost};
pub use scheduling::{SlotEngine, SlotQuery};
