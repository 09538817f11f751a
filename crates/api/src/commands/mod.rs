//! Command surface - one function per client-facing operation
//!
//! Commands take the [`AppContext`](crate::AppContext) plus the
//! caller's identity where the operation is owner-scoped. Session
//! verification happens before a command is invoked.

mod availability;
mod bookings;
mod event_types;
mod health;
mod hosts;
mod public;

pub use availability::*;
pub use bookings::*;
pub use event_types::*;
pub use health::*;
pub use hosts::*;
pub use public::*;
