//! Slot engine service

use std::sync::Arc;

use chrono::{DateTime, Days, NaiveDate, Utc};
use chrono_tz::Tz;
use schedulr_domain::{EventType, Result, SchedulingConfig, SchedulrError, Slot};
use tracing::{debug, instrument};
use uuid::Uuid;

use super::grid::{self, SlotRules};
use super::window::day_windows;
use crate::availability::ports::AvailabilityRepository;
use crate::bookings::ports::BookingRepository;
use crate::clock::Clock;
use crate::event_types::ports::EventTypeRepository;
use crate::hosts::ports::HostRepository;

/// Inputs of a slot computation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SlotQuery {
    pub owner_id: Uuid,
    pub event_type_id: Uuid,
    /// First owner-local calendar date, inclusive
    pub range_start: NaiveDate,
    /// Last owner-local calendar date, inclusive
    pub range_end: NaiveDate,
    pub timezone: Tz,
}

/// Derives bookable slots from availability, event type rules and the
/// booking ledger.
///
/// The read path takes no locks. A slot offered here may be gone by the time
/// it is committed; the committer re-checks.
pub struct SlotEngine {
    hosts: Arc<dyn HostRepository>,
    event_types: Arc<dyn EventTypeRepository>,
    availability: Arc<dyn AvailabilityRepository>,
    bookings: Arc<dyn BookingRepository>,
    clock: Arc<dyn Clock>,
    limits: SchedulingConfig,
}

impl SlotEngine {
    pub fn new(
        hosts: Arc<dyn HostRepository>,
        event_types: Arc<dyn EventTypeRepository>,
        availability: Arc<dyn AvailabilityRepository>,
        bookings: Arc<dyn BookingRepository>,
        clock: Arc<dyn Clock>,
        limits: SchedulingConfig,
    ) -> Self {
        Self { hosts, event_types, availability, bookings, clock, limits }
    }

    /// Bookable slots of an event type over an owner-local date range,
    /// ascending by start.
    ///
    /// # Errors
    /// - `NotFound` if the event type is unknown or belongs to someone else
    /// - `NotBookable` if the event type is inactive
    /// - `Validation` / `OutOfRange` for a malformed or out-of-bounds range
    #[instrument(skip(self), fields(owner_id = %query.owner_id, event_type_id = %query.event_type_id))]
    pub async fn compute_slots(&self, query: &SlotQuery) -> Result<Vec<Slot>> {
        let event_type = self.bookable_event_type(query.owner_id, query.event_type_id).await?;

        let now = self.clock.now();
        let today = now.with_timezone(&query.timezone).date_naive();
        validate_range(query.range_start, query.range_end, today, &self.limits)?;

        let slots = self
            .slots_in_range(&event_type, query.timezone, query.range_start, query.range_end, now)
            .await?;

        debug!(
            range_start = %query.range_start,
            range_end = %query.range_end,
            slot_count = slots.len(),
            "Computed slots"
        );
        Ok(slots)
    }

    /// Public slot lookup: `date` plus the following days up to the
    /// configured range length, clamped to the booking horizon.
    ///
    /// # Errors
    /// `NotFound` for an unknown or inactive host, otherwise as
    /// [`Self::compute_slots`].
    pub async fn slots_for_host(
        &self,
        username: &str,
        event_type_id: Uuid,
        date: NaiveDate,
    ) -> Result<Vec<Slot>> {
        let host = self
            .hosts
            .get_by_username(&username.trim().to_lowercase())
            .await?
            .filter(|host| host.active)
            .ok_or_else(|| SchedulrError::NotFound(format!("host {username}")))?;
        let timezone = host.tz()?;

        let today = self.clock.now().with_timezone(&timezone).date_naive();
        let span = u64::from(self.limits.max_range_days.saturating_sub(1));
        let horizon_end = add_days(today, self.limits.horizon_days)?;
        let range_end = add_days_u64(date, span)?.min(horizon_end);
        if range_end < date {
            return Err(SchedulrError::OutOfRange(format!(
                "{date} is beyond the {} day booking horizon",
                self.limits.horizon_days
            )));
        }

        self.compute_slots(&SlotQuery {
            owner_id: host.id,
            event_type_id,
            range_start: date,
            range_end,
            timezone,
        })
        .await
    }

    /// Commit-time checks on a requested start: strictly in the future,
    /// inside the horizon and on the owner's current availability grid.
    ///
    /// Conflicts with other bookings are not checked here; that happens
    /// atomically during the insert.
    ///
    /// # Errors
    /// `OutOfRange` for past or too-distant starts, `SlotNoLongerAvailable`
    /// when the start is no longer a grid position.
    pub async fn ensure_on_grid(
        &self,
        event_type: &EventType,
        timezone: Tz,
        start: DateTime<Utc>,
    ) -> Result<()> {
        let now = self.clock.now();
        if start <= now {
            return Err(SchedulrError::OutOfRange(format!("slot start {start} is in the past")));
        }

        let today = now.with_timezone(&timezone).date_naive();
        let local_date = start.with_timezone(&timezone).date_naive();
        if local_date > add_days(today, self.limits.horizon_days)? {
            return Err(SchedulrError::OutOfRange(format!(
                "slot start {start} is beyond the {} day booking horizon",
                self.limits.horizon_days
            )));
        }

        let rules = self.availability.list_for_owner(event_type.owner_id).await?;
        let windows = day_windows(&rules, timezone, local_date, local_date);
        if grid::is_on_grid(&windows, SlotRules::for_event_type(event_type), start) {
            Ok(())
        } else {
            Err(SchedulrError::SlotNoLongerAvailable(format!(
                "{start} is not an offered slot for event type {}",
                event_type.id
            )))
        }
    }

    /// Load an event type that `owner_id` owns and that accepts bookings.
    ///
    /// # Errors
    /// `NotFound` if unknown or owned by someone else, `NotBookable` if
    /// inactive.
    pub async fn bookable_event_type(&self, owner_id: Uuid, event_type_id: Uuid) -> Result<EventType> {
        let event_type = self
            .event_types
            .get(event_type_id)
            .await?
            .filter(|event_type| event_type.owner_id == owner_id)
            .ok_or_else(|| SchedulrError::NotFound(format!("event type {event_type_id}")))?;

        if !event_type.active {
            return Err(SchedulrError::NotBookable(format!(
                "event type {} is inactive",
                event_type.name
            )));
        }
        Ok(event_type)
    }

    async fn slots_in_range(
        &self,
        event_type: &EventType,
        timezone: Tz,
        from: NaiveDate,
        to: NaiveDate,
        now: DateTime<Utc>,
    ) -> Result<Vec<Slot>> {
        let rules = self.availability.list_for_owner(event_type.owner_id).await?;
        let windows = day_windows(&rules, timezone, from, to);

        let (Some(first), Some(last)) = (
            windows.iter().map(|w| w.start).min(),
            windows.iter().map(|w| w.end).max(),
        ) else {
            return Ok(Vec::new());
        };

        let booked = self.bookings.list_booked_between(event_type.owner_id, first, last).await?;
        Ok(grid::compute_slots(&windows, SlotRules::for_event_type(event_type), &booked, now))
    }
}

/// Reject malformed ranges and ranges outside `[today, today + horizon]`.
///
/// # Errors
/// `Validation` if `end < start`; `OutOfRange` if the range is longer than
/// `max_range_days`, entirely in the past, or ends past the horizon.
pub fn validate_range(
    start: NaiveDate,
    end: NaiveDate,
    today: NaiveDate,
    limits: &SchedulingConfig,
) -> Result<()> {
    if end < start {
        return Err(SchedulrError::Validation(format!("range end {end} precedes start {start}")));
    }

    let days = (end - start).num_days() + 1;
    if days > i64::from(limits.max_range_days) {
        return Err(SchedulrError::OutOfRange(format!(
            "range spans {days} days; at most {} allowed",
            limits.max_range_days
        )));
    }
    if end < today {
        return Err(SchedulrError::OutOfRange(format!("range ending {end} is in the past")));
    }
    if end > add_days(today, limits.horizon_days)? {
        return Err(SchedulrError::OutOfRange(format!(
            "range ending {end} is beyond the {} day booking horizon",
            limits.horizon_days
        )));
    }
    Ok(())
}

fn add_days(date: NaiveDate, days: u32) -> Result<NaiveDate> {
    add_days_u64(date, u64::from(days))
}

fn add_days_u64(date: NaiveDate, days: u64) -> Result<NaiveDate> {
    date.checked_add_days(Days::new(days))
        .ok_or_else(|| SchedulrError::OutOfRange(format!("{date} + {days} days overflows")))
}
