//! Booking committer - the only writer of new bookings
//!
//! Two guests may race for the same slot. Commits for one owner are
//! serialized by an in-process mutex keyed by owner id, and the repository's
//! `insert_if_free` repeats the conflict check inside its own transaction, so
//! at most one of two overlapping commits succeeds even across processes
//! sharing a database.

use std::sync::Arc;

use dashmap::DashMap;
use schedulr_domain::{Booking, BookingRequest, Host, Result, SchedulrError, Slot};
use tokio::sync::Mutex;
use tracing::{info, instrument};
use uuid::Uuid;

use super::ports::BookingRepository;
use super::post_commit::PostCommitDispatcher;
use crate::clock::Clock;
use crate::hosts::ports::HostRepository;
use crate::scheduling::grid::{self, SlotRules};
use crate::scheduling::SlotEngine;

/// Validates a chosen slot and atomically records it
pub struct BookingCommitter {
    hosts: Arc<dyn HostRepository>,
    bookings: Arc<dyn BookingRepository>,
    engine: Arc<SlotEngine>,
    dispatcher: Arc<PostCommitDispatcher>,
    clock: Arc<dyn Clock>,
    owner_locks: DashMap<Uuid, Arc<Mutex<()>>>,
}

impl BookingCommitter {
    pub fn new(
        hosts: Arc<dyn HostRepository>,
        bookings: Arc<dyn BookingRepository>,
        engine: Arc<SlotEngine>,
        dispatcher: Arc<PostCommitDispatcher>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { hosts, bookings, engine, dispatcher, clock, owner_locks: DashMap::new() }
    }

    /// Public booking flow: resolve the host by username, then commit.
    pub async fn book(&self, username: &str, request: BookingRequest) -> Result<Booking> {
        let host = self
            .hosts
            .get_by_username(&username.trim().to_lowercase())
            .await?
            .filter(|host| host.active)
            .ok_or_else(|| SchedulrError::NotFound(format!("host {username}")))?;
        self.commit_for_host(host, request).await
    }

    /// Commit a booking against an owner's event type.
    ///
    /// # Errors
    /// - `Validation` for malformed guest input
    /// - `NotFound` / `NotBookable` for the host or event type
    /// - `OutOfRange` for a past start or one beyond the horizon
    /// - `SlotNoLongerAvailable` if the start is off the grid or taken
    pub async fn commit_booking(&self, owner_id: Uuid, request: BookingRequest) -> Result<Booking> {
        let host = self
            .hosts
            .get_by_id(owner_id)
            .await?
            .filter(|host| host.active)
            .ok_or_else(|| SchedulrError::NotFound(format!("host {owner_id}")))?;
        self.commit_for_host(host, request).await
    }

    #[instrument(skip(self, host, request), fields(owner_id = %host.id, event_type_id = %request.event_type_id))]
    async fn commit_for_host(&self, host: Host, request: BookingRequest) -> Result<Booking> {
        request.validate()?;

        let event_type = self.engine.bookable_event_type(host.id, request.event_type_id).await?;
        self.engine.ensure_on_grid(&event_type, host.tz()?, request.start_time).await?;

        let candidate = Booking::from_request(&event_type, &request, self.clock.now());
        let rules = SlotRules::for_event_type(&event_type);
        let slot = Slot::new(candidate.start_time, candidate.end_time);

        let lock = self.owner_lock(host.id);
        let committed = {
            let _guard = lock.lock().await;

            let (from, to) = rules.blocked(slot);
            let taken = |booked: &[Booking]| {
                booked.iter().any(|existing| grid::conflicts_with(slot, rules, existing))
            };
            match self.bookings.list_booked_between(host.id, from, to).await {
                Ok(booked) if taken(&booked) => Err(SchedulrError::SlotNoLongerAvailable(format!(
                    "{} overlaps an existing booking",
                    slot.start_time
                ))),
                Ok(_) => self.bookings.insert_if_free(candidate).await,
                Err(err) => Err(err),
            }
        };
        drop(lock);
        self.release_owner_lock(host.id);
        let booking = committed?;

        info!(
            booking_id = %booking.id,
            start = %booking.start_time,
            end = %booking.end_time,
            "Booking committed"
        );

        drop(self.dispatcher.booking_committed(booking.clone(), host));
        Ok(booking)
    }

    /// Owners with a commit holding or awaiting their mutex.
    pub fn locked_owners(&self) -> usize {
        self.owner_locks.len()
    }

    fn owner_lock(&self, owner_id: Uuid) -> Arc<Mutex<()>> {
        Arc::clone(self.owner_locks.entry(owner_id).or_default().value())
    }

    /// Drop the owner's mutex once no other commit holds or awaits it.
    fn release_owner_lock(&self, owner_id: Uuid) {
        self.owner_locks.remove_if(&owner_id, |_, lock| Arc::strong_count(lock) == 1);
    }
}
