//! Candidate slot generation and conflict filtering
//!
//! Everything here is pure: windows, bookings and `now` are inputs, so the
//! same inputs always produce the same slots.

use chrono::{DateTime, Duration, Utc};
use schedulr_domain::{Booking, EventType, Slot};

use super::window::DayWindow;

/// Duration and buffer rules of the event type being scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotRules {
    pub duration: Duration,
    pub buffer_before: Duration,
    pub buffer_after: Duration,
}

impl SlotRules {
    pub fn for_event_type(event_type: &EventType) -> Self {
        Self {
            duration: event_type.duration(),
            buffer_before: event_type.buffer_before(),
            buffer_after: event_type.buffer_after(),
        }
    }

    /// The slot widened by this event type's buffers
    pub fn blocked(&self, slot: Slot) -> (DateTime<Utc>, DateTime<Utc>) {
        (slot.start_time - self.buffer_before, slot.end_time + self.buffer_after)
    }
}

/// Grid candidates of one window: steps of `duration` from the window start
/// whose buffered interval fits inside the window.
pub fn candidates(window: &DayWindow, rules: SlotRules) -> impl Iterator<Item = Slot> + '_ {
    let step = rules.duration;
    let mut cursor = window.start;

    std::iter::from_fn(move || {
        if step <= Duration::zero() {
            return None;
        }
        while cursor + step <= window.end {
            let slot = Slot::new(cursor, cursor + step);
            cursor += step;
            let (blocked_start, blocked_end) = rules.blocked(slot);
            if blocked_start >= window.start && blocked_end <= window.end {
                return Some(slot);
            }
        }
        None
    })
}

/// Whether `slot` (with `rules` buffers) collides with a booked reservation
/// and its own snapshot buffers. Touching intervals do not collide.
pub fn conflicts_with(slot: Slot, rules: SlotRules, booking: &Booking) -> bool {
    if !booking.is_booked() {
        return false;
    }
    let (cand_start, cand_end) = rules.blocked(slot);
    let (held_start, held_end) = booking.blocked_interval();
    Slot::new(cand_start, cand_end).overlaps(&Slot::new(held_start, held_end))
}

/// Bookable slots for `windows`, ascending by start.
///
/// Drops candidates starting at or before `now` and candidates that conflict
/// with any of `booked`.
pub fn compute_slots(
    windows: &[DayWindow],
    rules: SlotRules,
    booked: &[Booking],
    now: DateTime<Utc>,
) -> Vec<Slot> {
    let mut slots: Vec<Slot> = windows
        .iter()
        .flat_map(|window| candidates(window, rules))
        .filter(|slot| slot.start_time > now)
        .filter(|slot| !booked.iter().any(|booking| conflicts_with(*slot, rules, booking)))
        .collect();

    slots.sort_unstable();
    slots.dedup();
    slots
}

/// Whether `start` is a grid position of any of `windows`
pub fn is_on_grid(windows: &[DayWindow], rules: SlotRules, start: DateTime<Utc>) -> bool {
    windows
        .iter()
        .filter(|window| window.start <= start && start < window.end)
        .any(|window| candidates(window, rules).any(|slot| slot.start_time == start))
}
