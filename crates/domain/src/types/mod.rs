//! Domain types and models
//!
//! Persistent entities (hosts, availability rules, event types, bookings)
//! and the derived [`Slot`] value.

pub mod availability;
pub mod booking;
pub mod event_type;
pub mod host;
pub mod slot;

pub use availability::{AvailabilityRule, AvailabilityRuleInput, DayOfWeek};
pub use booking::{Booking, BookingRequest, BookingStatus, CancelRequest};
pub use event_type::{EventType, EventTypeDraft, LocationType};
pub use host::{Host, PublicProfile};
pub use slot::Slot;
