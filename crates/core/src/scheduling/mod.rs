//! Slot computation
//!
//! - [`window`]: localize weekly wall-clock rules to UTC windows per date
//! - [`grid`]: partition windows into candidate slots and test conflicts
//! - [`engine`]: the [`SlotEngine`] service reading through the ports

pub mod engine;
pub mod grid;
pub mod window;

pub use engine::{SlotEngine, SlotQuery};
pub use grid::{compute_slots, SlotRules};
pub use window::{day_windows, DayWindow};
