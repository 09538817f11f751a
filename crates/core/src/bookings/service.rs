//! Booking service - cancellation and owner listings

use std::sync::Arc;

use chrono::Duration;
use schedulr_domain::{Booking, BookingStatus, Result, SchedulrError};
use tracing::{info, warn};
use uuid::Uuid;

use super::ports::BookingRepository;
use super::post_commit::PostCommitDispatcher;
use crate::clock::Clock;
use crate::hosts::ports::HostRepository;

/// Booking service
pub struct BookingService {
    bookings: Arc<dyn BookingRepository>,
    hosts: Arc<dyn HostRepository>,
    dispatcher: Arc<PostCommitDispatcher>,
    clock: Arc<dyn Clock>,
    upcoming_window: Duration,
}

impl BookingService {
    pub fn new(
        bookings: Arc<dyn BookingRepository>,
        hosts: Arc<dyn HostRepository>,
        dispatcher: Arc<PostCommitDispatcher>,
        clock: Arc<dyn Clock>,
        upcoming_window_days: u32,
    ) -> Self {
        Self {
            bookings,
            hosts,
            dispatcher,
            clock,
            upcoming_window: Duration::days(i64::from(upcoming_window_days)),
        }
    }

    /// Get a booking of `owner_id`
    pub async fn get(&self, owner_id: Uuid, id: Uuid) -> Result<Booking> {
        let booking = self
            .bookings
            .get(id)
            .await?
            .filter(|booking| booking.owner_id == owner_id)
            .ok_or_else(|| SchedulrError::NotFound(format!("booking {id}")))?;
        Ok(booking.observed_at(self.clock.now()))
    }

    /// Cancel a booking on behalf of its owner.
    ///
    /// Cancelling is one-shot: a booking that is already cancelled or has
    /// already ended is rejected rather than reported as success.
    ///
    /// # Errors
    /// `NotFound`, `Forbidden` for a non-owner, `InvalidState` for anything
    /// not currently booked.
    pub async fn cancel_booking(
        &self,
        booking_id: Uuid,
        requester_id: Uuid,
        reason: Option<String>,
    ) -> Result<Booking> {
        let booking = self
            .bookings
            .get(booking_id)
            .await?
            .ok_or_else(|| SchedulrError::NotFound(format!("booking {booking_id}")))?;

        if booking.owner_id != requester_id {
            return Err(SchedulrError::Forbidden(format!(
                "booking {booking_id} belongs to another host"
            )));
        }

        let now = self.clock.now();
        match booking.effective_status(now) {
            BookingStatus::Booked => {}
            BookingStatus::Cancelled => {
                return Err(SchedulrError::InvalidState(format!(
                    "booking {booking_id} is already cancelled"
                )));
            }
            BookingStatus::Completed => {
                return Err(SchedulrError::InvalidState(format!(
                    "booking {booking_id} has already taken place"
                )));
            }
        }

        let reason = reason.map(|r| r.trim().to_string()).filter(|r| !r.is_empty());
        let cancelled = self.bookings.cancel(booking_id, reason, now).await?.ok_or_else(|| {
            SchedulrError::InvalidState(format!("booking {booking_id} is no longer booked"))
        })?;

        info!(booking_id = %booking_id, owner_id = %requester_id, "Booking cancelled");

        match self.hosts.get_by_id(cancelled.owner_id).await {
            Ok(Some(host)) => drop(self.dispatcher.booking_cancelled(cancelled.clone(), host)),
            Ok(None) => warn!(booking_id = %booking_id, "Host vanished; cancellation notice skipped"),
            Err(err) => warn!(booking_id = %booking_id, error = %err, "Host lookup failed; cancellation notice skipped"),
        }

        Ok(cancelled.observed_at(now))
    }

    /// Every booking of an owner, newest start first
    pub async fn list_all(&self, owner_id: Uuid) -> Result<Vec<Booking>> {
        let now = self.clock.now();
        let mut bookings = self.bookings.list_for_owner(owner_id).await?;
        bookings.sort_by(|a, b| b.start_time.cmp(&a.start_time));
        Ok(bookings.into_iter().map(|b| b.observed_at(now)).collect())
    }

    /// Booked reservations starting between now and the upcoming window,
    /// soonest first
    pub async fn list_upcoming(&self, owner_id: Uuid) -> Result<Vec<Booking>> {
        let now = self.clock.now();
        let until = now + self.upcoming_window;

        let mut bookings: Vec<_> = self
            .bookings
            .list_for_owner(owner_id)
            .await?
            .into_iter()
            .filter(|b| b.is_booked() && b.start_time >= now && b.start_time <= until)
            .map(|b| b.observed_at(now))
            .collect();
        bookings.sort_by_key(|b| b.start_time);
        Ok(bookings)
    }

    /// Non-cancelled bookings that started before now, most recent first
    pub async fn list_past(&self, owner_id: Uuid) -> Result<Vec<Booking>> {
        let now = self.clock.now();

        let mut bookings: Vec<_> = self
            .bookings
            .list_for_owner(owner_id)
            .await?
            .into_iter()
            .filter(|b| b.start_time < now && b.status != BookingStatus::Cancelled)
            .map(|b| b.observed_at(now))
            .collect();
        bookings.sort_by(|a, b| b.start_time.cmp(&a.start_time));
        Ok(bookings)
    }
}
