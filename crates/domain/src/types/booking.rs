//! Committed reservations
//!
//! A booking carries a denormalized snapshot of its event type (name,
//! duration, buffers, location type) taken at commit time, so later edits or
//! deletion of the event type never rewrite history.

use chrono::{DateTime, Duration, Timelike, Utc};
use serde::{Deserialize, Serialize};
#[cfg(feature = "ts-gen")]
use ts_rs::TS;
use uuid::Uuid;

use super::event_type::{EventType, LocationType};
use crate::constants::{MAX_GUEST_NAME_LENGTH, MAX_NOTES_LENGTH};
use crate::errors::{Result, SchedulrError};
use crate::impl_domain_status_conversions;
use crate::utils::email::is_plausible_email;

/// Booking lifecycle status
///
/// Only `Booked` and `Cancelled` are ever stored; `Completed` is derived
/// from the clock by [`Booking::effective_status`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Booked,
    Cancelled,
    Completed,
}

impl_domain_status_conversions!(BookingStatus {
    Booked => "booked",
    Cancelled => "cancelled",
    Completed => "completed",
});

/// Reservation of a host's time by a guest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: Uuid,
    pub owner_id: Uuid,
    pub event_type_id: Uuid,
    pub event_type_name: String,
    pub duration_minutes: u32,
    #[serde(rename = "bufferBefore")]
    pub buffer_before_minutes: u32,
    #[serde(rename = "bufferAfter")]
    pub buffer_after_minutes: u32,
    pub location_type: LocationType,
    pub guest_name: String,
    pub guest_email: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub status: BookingStatus,
    pub notes: Option<String>,
    pub meeting_link: Option<String>,
    pub cancellation_reason: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Booking {
    /// Build a `Booked` reservation for `request`, snapshotting `event_type`.
    ///
    /// `Custom` locations copy the event type's location details into the
    /// meeting link; video providers receive theirs after commit.
    pub fn from_request(
        event_type: &EventType,
        request: &BookingRequest,
        now: DateTime<Utc>,
    ) -> Self {
        let start_time = request.start_time;
        let meeting_link = match event_type.location_type {
            LocationType::Custom => event_type.location_details.clone(),
            LocationType::Zoom | LocationType::GoogleMeet => None,
        };

        Self {
            id: Uuid::now_v7(),
            owner_id: event_type.owner_id,
            event_type_id: event_type.id,
            event_type_name: event_type.name.clone(),
            duration_minutes: event_type.duration_minutes,
            buffer_before_minutes: event_type.buffer_before_minutes,
            buffer_after_minutes: event_type.buffer_after_minutes,
            location_type: event_type.location_type,
            guest_name: request.guest_name.trim().to_string(),
            guest_email: request.guest_email.trim().to_lowercase(),
            start_time,
            end_time: start_time + event_type.duration(),
            status: BookingStatus::Booked,
            notes: request
                .notes
                .as_ref()
                .map(|n| n.trim().to_string())
                .filter(|n| !n.is_empty()),
            meeting_link,
            cancellation_reason: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Status as observed at `now`: a `Booked` booking that has ended reads
    /// as `Completed`.
    pub fn effective_status(&self, now: DateTime<Utc>) -> BookingStatus {
        match self.status {
            BookingStatus::Booked if self.end_time <= now => BookingStatus::Completed,
            status => status,
        }
    }

    /// Copy with `status` replaced by [`Self::effective_status`].
    #[must_use]
    pub fn observed_at(mut self, now: DateTime<Utc>) -> Self {
        self.status = self.effective_status(now);
        self
    }

    /// Interval this booking keeps free of other bookings, buffers included.
    pub fn blocked_interval(&self) -> (DateTime<Utc>, DateTime<Utc>) {
        (
            self.start_time - Duration::minutes(i64::from(self.buffer_before_minutes)),
            self.end_time + Duration::minutes(i64::from(self.buffer_after_minutes)),
        )
    }

    /// Whether the booking still holds its time.
    pub fn is_booked(&self) -> bool {
        self.status == BookingStatus::Booked
    }
}

/// Guest submission of a chosen slot
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
#[serde(rename_all = "camelCase")]
pub struct BookingRequest {
    pub event_type_id: Uuid,
    pub start_time: DateTime<Utc>,
    pub guest_name: String,
    pub guest_email: String,
    #[serde(default)]
    pub notes: Option<String>,
}

impl BookingRequest {
    /// Check guest fields and slot-start granularity.
    ///
    /// # Errors
    /// Returns `SchedulrError::Validation` describing the first problem.
    pub fn validate(&self) -> Result<()> {
        let name = self.guest_name.trim();
        if name.is_empty() {
            return Err(SchedulrError::Validation("guest name must not be empty".into()));
        }
        if name.chars().count() > MAX_GUEST_NAME_LENGTH {
            return Err(SchedulrError::Validation(format!(
                "guest name exceeds {MAX_GUEST_NAME_LENGTH} characters"
            )));
        }
        if !is_plausible_email(self.guest_email.trim()) {
            return Err(SchedulrError::Validation(format!(
                "invalid guest email: {}",
                self.guest_email
            )));
        }
        if self.notes.as_ref().is_some_and(|n| n.chars().count() > MAX_NOTES_LENGTH) {
            return Err(SchedulrError::Validation(format!(
                "notes exceed {MAX_NOTES_LENGTH} characters"
            )));
        }
        if self.start_time.second() != 0 || self.start_time.nanosecond() != 0 {
            return Err(SchedulrError::Validation(
                "slot start must be on a whole minute".into(),
            ));
        }
        Ok(())
    }
}

/// Owner-initiated cancellation payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "ts-gen", derive(TS))]
#[cfg_attr(feature = "ts-gen", ts(export))]
pub struct CancelRequest {
    #[serde(default)]
    pub reason: Option<String>,
}
