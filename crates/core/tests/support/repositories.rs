//! In-memory implementations of the core ports
//!
//! Each mock keeps its state behind a `std::sync::Mutex` so the check and
//! the write of `insert_if_free` happen under one lock, like the SQLite
//! transaction they stand in for.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use schedulr_core::{
    AvailabilityRepository, BookingNotifier, BookingRepository, EventTypeRepository,
    HostRepository, MeetingLinkProvisioner,
};
use schedulr_domain::{
    AvailabilityRule, Booking, BookingStatus, EventType, Host, Result as DomainResult,
    SchedulrError,
};
use uuid::Uuid;

#[derive(Default)]
pub struct InMemoryHostRepository {
    hosts: Mutex<Vec<Host>>,
}

#[async_trait]
impl HostRepository for InMemoryHostRepository {
    async fn get_by_id(&self, id: Uuid) -> DomainResult<Option<Host>> {
        Ok(self.hosts.lock().unwrap().iter().find(|h| h.id == id).cloned())
    }

    async fn get_by_username(&self, username: &str) -> DomainResult<Option<Host>> {
        Ok(self.hosts.lock().unwrap().iter().find(|h| h.username == username).cloned())
    }

    async fn list(&self) -> DomainResult<Vec<Host>> {
        Ok(self.hosts.lock().unwrap().clone())
    }

    async fn create(&self, host: Host) -> DomainResult<()> {
        let mut hosts = self.hosts.lock().unwrap();
        if hosts.iter().any(|h| h.username == host.username) {
            return Err(SchedulrError::Validation(format!("username taken: {}", host.username)));
        }
        hosts.push(host);
        Ok(())
    }

    async fn update(&self, host: Host) -> DomainResult<()> {
        let mut hosts = self.hosts.lock().unwrap();
        if hosts.iter().any(|h| h.username == host.username && h.id != host.id) {
            return Err(SchedulrError::Validation(format!("username taken: {}", host.username)));
        }
        let slot = hosts
            .iter_mut()
            .find(|h| h.id == host.id)
            .ok_or_else(|| SchedulrError::NotFound(format!("host {}", host.id)))?;
        slot.username = host.username;
        slot.name = host.name;
        slot.timezone = host.timezone;
        Ok(())
    }

    async fn set_active(&self, id: Uuid, active: bool) -> DomainResult<bool> {
        let mut hosts = self.hosts.lock().unwrap();
        let Some(host) = hosts.iter_mut().find(|h| h.id == id) else {
            return Ok(false);
        };
        host.active = active;
        Ok(true)
    }
}

#[derive(Default)]
pub struct InMemoryEventTypeRepository {
    event_types: Mutex<Vec<EventType>>,
}

#[async_trait]
impl EventTypeRepository for InMemoryEventTypeRepository {
    async fn get(&self, id: Uuid) -> DomainResult<Option<EventType>> {
        Ok(self.event_types.lock().unwrap().iter().find(|e| e.id == id).cloned())
    }

    async fn list_for_owner(&self, owner_id: Uuid, active_only: bool) -> DomainResult<Vec<EventType>> {
        Ok(self
            .event_types
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.owner_id == owner_id && (!active_only || e.active))
            .cloned()
            .collect())
    }

    async fn insert(&self, event_type: EventType) -> DomainResult<()> {
        self.event_types.lock().unwrap().push(event_type);
        Ok(())
    }

    async fn update(&self, event_type: EventType) -> DomainResult<()> {
        let mut event_types = self.event_types.lock().unwrap();
        let slot = event_types
            .iter_mut()
            .find(|e| e.id == event_type.id)
            .ok_or_else(|| SchedulrError::NotFound(format!("event type {}", event_type.id)))?;
        *slot = event_type;
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> DomainResult<bool> {
        let mut event_types = self.event_types.lock().unwrap();
        let before = event_types.len();
        event_types.retain(|e| e.id != id);
        Ok(event_types.len() != before)
    }
}

#[derive(Default)]
pub struct InMemoryAvailabilityRepository {
    rules: Mutex<Vec<AvailabilityRule>>,
}

#[async_trait]
impl AvailabilityRepository for InMemoryAvailabilityRepository {
    async fn list_for_owner(&self, owner_id: Uuid) -> DomainResult<Vec<AvailabilityRule>> {
        Ok(self.rules.lock().unwrap().iter().filter(|r| r.owner_id == owner_id).cloned().collect())
    }

    async fn replace_for_owner(
        &self,
        owner_id: Uuid,
        rules: Vec<AvailabilityRule>,
    ) -> DomainResult<Vec<AvailabilityRule>> {
        let mut stored = self.rules.lock().unwrap();
        stored.retain(|r| r.owner_id != owner_id);
        stored.extend(rules.iter().cloned());
        Ok(rules)
    }
}

#[derive(Default)]
pub struct InMemoryBookingRepository {
    bookings: Mutex<Vec<Booking>>,
    reads_fail: AtomicBool,
}

impl InMemoryBookingRepository {
    /// Seed a booking without any checks
    pub fn seed(&self, booking: Booking) {
        self.bookings.lock().unwrap().push(booking);
    }

    pub fn snapshot(&self) -> Vec<Booking> {
        self.bookings.lock().unwrap().clone()
    }

    /// Make `list_booked_between` fail like a locked database
    pub fn fail_reads(&self, fail: bool) {
        self.reads_fail.store(fail, Ordering::SeqCst);
    }
}

fn intersects(booking: &Booking, from: DateTime<Utc>, to: DateTime<Utc>) -> bool {
    let (start, end) = booking.blocked_interval();
    start < to && end > from
}

#[async_trait]
impl BookingRepository for InMemoryBookingRepository {
    async fn get(&self, id: Uuid) -> DomainResult<Option<Booking>> {
        Ok(self.bookings.lock().unwrap().iter().find(|b| b.id == id).cloned())
    }

    async fn list_for_owner(&self, owner_id: Uuid) -> DomainResult<Vec<Booking>> {
        let mut bookings: Vec<_> =
            self.bookings.lock().unwrap().iter().filter(|b| b.owner_id == owner_id).cloned().collect();
        bookings.sort_by(|a, b| b.start_time.cmp(&a.start_time));
        Ok(bookings)
    }

    async fn list_booked_between(
        &self,
        owner_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> DomainResult<Vec<Booking>> {
        // Let racing commits interleave between the read and the insert.
        tokio::task::yield_now().await;
        if self.reads_fail.load(Ordering::SeqCst) {
            return Err(SchedulrError::Database("database is locked".into()));
        }

        let mut bookings: Vec<_> = self
            .bookings
            .lock()
            .unwrap()
            .iter()
            .filter(|b| b.owner_id == owner_id && b.is_booked() && intersects(b, from, to))
            .cloned()
            .collect();
        bookings.sort_by_key(|b| b.start_time);
        Ok(bookings)
    }

    async fn insert_if_free(&self, booking: Booking) -> DomainResult<Booking> {
        let mut bookings = self.bookings.lock().unwrap();
        let (from, to) = booking.blocked_interval();
        if bookings
            .iter()
            .any(|b| b.owner_id == booking.owner_id && b.is_booked() && intersects(b, from, to))
        {
            return Err(SchedulrError::SlotNoLongerAvailable(booking.start_time.to_string()));
        }
        bookings.push(booking.clone());
        Ok(booking)
    }

    async fn cancel(
        &self,
        id: Uuid,
        reason: Option<String>,
        at: DateTime<Utc>,
    ) -> DomainResult<Option<Booking>> {
        let mut bookings = self.bookings.lock().unwrap();
        Ok(bookings.iter_mut().find(|b| b.id == id && b.is_booked()).map(|b| {
            b.status = BookingStatus::Cancelled;
            b.cancellation_reason = reason;
            b.updated_at = at;
            b.clone()
        }))
    }

    async fn set_meeting_link(&self, id: Uuid, link: &str) -> DomainResult<()> {
        let mut bookings = self.bookings.lock().unwrap();
        let booking = bookings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(|| SchedulrError::NotFound(format!("booking {id}")))?;
        booking.meeting_link = Some(link.to_string());
        Ok(())
    }
}

/// Records notification events as `"<kind>:<booking id>"`
#[derive(Default)]
pub struct RecordingNotifier {
    events: Mutex<Vec<String>>,
    links: Mutex<Vec<Option<String>>>,
}

impl RecordingNotifier {
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    /// Meeting links seen by `booking_committed`, in call order
    pub fn links(&self) -> Vec<Option<String>> {
        self.links.lock().unwrap().clone()
    }
}

#[async_trait]
impl BookingNotifier for RecordingNotifier {
    async fn booking_committed(&self, booking: &Booking, _host: &Host) -> DomainResult<()> {
        self.events.lock().unwrap().push(format!("committed:{}", booking.id));
        self.links.lock().unwrap().push(booking.meeting_link.clone());
        Ok(())
    }

    async fn booking_cancelled(&self, booking: &Booking, _host: &Host) -> DomainResult<()> {
        self.events.lock().unwrap().push(format!("cancelled:{}", booking.id));
        Ok(())
    }
}

/// Returns a fixed link, or fails every call
pub struct StaticLinkProvisioner {
    link: Option<String>,
}

impl StaticLinkProvisioner {
    pub fn ok(link: &str) -> Self {
        Self { link: Some(link.to_string()) }
    }

    pub fn failing() -> Self {
        Self { link: None }
    }
}

#[async_trait]
impl MeetingLinkProvisioner for StaticLinkProvisioner {
    async fn provision(&self, _booking: &Booking) -> DomainResult<String> {
        self.link
            .clone()
            .ok_or_else(|| SchedulrError::Internal("provider unavailable".into()))
    }
}
