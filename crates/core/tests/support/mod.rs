//! Shared test helpers for `schedulr-core` integration tests.
//!
//! In-memory port implementations plus a [`Harness`] that wires every service
//! against them with a fixed clock.

#![allow(dead_code)]

pub mod repositories;

use std::sync::Arc;

use chrono::{DateTime, NaiveTime, TimeZone, Utc};
use schedulr_core::{
    AvailabilityService, BookingCommitter, BookingService, EventTypeService, FixedClock,
    HostService, NewHost, PostCommitDispatcher, SlotEngine,
};
use schedulr_domain::{
    AvailabilityRuleInput, BookingRequest, DayOfWeek, EventType, EventTypeDraft, Host,
    SchedulingConfig,
};
use uuid::Uuid;

pub use repositories::{
    InMemoryAvailabilityRepository, InMemoryBookingRepository, InMemoryEventTypeRepository,
    InMemoryHostRepository, RecordingNotifier, StaticLinkProvisioner,
};

/// Sunday 2030-01-06 12:00 UTC; the following Monday is 2030-01-07.
pub fn default_now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2030, 1, 6, 12, 0, 0).unwrap()
}

pub fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, mo, d, h, mi, 0).unwrap()
}

pub fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

pub fn rule(day: DayOfWeek, start: NaiveTime, end: NaiveTime) -> AvailabilityRuleInput {
    AvailabilityRuleInput { day_of_week: day, start_time: start, end_time: end, enabled: true }
}

pub fn request(event_type: &EventType, start: DateTime<Utc>) -> BookingRequest {
    BookingRequest {
        event_type_id: event_type.id,
        start_time: start,
        guest_name: "Ada Guest".into(),
        guest_email: "Ada@Example.com".into(),
        notes: None,
    }
}

/// Every core service wired against in-memory adapters
pub struct Harness {
    pub clock: Arc<FixedClock>,
    pub hosts_repo: Arc<InMemoryHostRepository>,
    pub bookings_repo: Arc<InMemoryBookingRepository>,
    pub notifier: Arc<RecordingNotifier>,
    pub hosts: HostService,
    pub availability: AvailabilityService,
    pub event_types: EventTypeService,
    pub engine: Arc<SlotEngine>,
    pub committer: Arc<BookingCommitter>,
    pub bookings: BookingService,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_now(default_now())
    }

    pub fn with_now(now: DateTime<Utc>) -> Self {
        Self::build(now, Arc::new(StaticLinkProvisioner::ok("https://zoom.us/j/1234567890")))
    }

    pub fn build(now: DateTime<Utc>, provisioner: Arc<StaticLinkProvisioner>) -> Self {
        let limits = SchedulingConfig::default();
        let clock = Arc::new(FixedClock::new(now));
        let hosts_repo = Arc::new(InMemoryHostRepository::default());
        let event_types_repo = Arc::new(InMemoryEventTypeRepository::default());
        let availability_repo = Arc::new(InMemoryAvailabilityRepository::default());
        let bookings_repo = Arc::new(InMemoryBookingRepository::default());
        let notifier = Arc::new(RecordingNotifier::default());

        let dispatcher = Arc::new(PostCommitDispatcher::new(
            bookings_repo.clone(),
            notifier.clone(),
            provisioner,
        ));
        let engine = Arc::new(SlotEngine::new(
            hosts_repo.clone(),
            event_types_repo.clone(),
            availability_repo.clone(),
            bookings_repo.clone(),
            clock.clone(),
            limits.clone(),
        ));

        Self {
            hosts: HostService::new(hosts_repo.clone(), clock.clone(), "UTC"),
            availability: AvailabilityService::new(availability_repo),
            event_types: EventTypeService::new(event_types_repo, hosts_repo.clone(), clock.clone()),
            committer: Arc::new(BookingCommitter::new(
                hosts_repo.clone(),
                bookings_repo.clone(),
                engine.clone(),
                dispatcher.clone(),
                clock.clone(),
            )),
            bookings: BookingService::new(
                bookings_repo.clone(),
                hosts_repo.clone(),
                dispatcher,
                clock.clone(),
                limits.upcoming_window_days,
            ),
            engine,
            clock,
            hosts_repo,
            bookings_repo,
            notifier,
        }
    }

    pub async fn host(&self, username: &str, timezone: &str) -> Host {
        self.hosts
            .register(NewHost {
                username: username.into(),
                name: format!("Host {username}"),
                email: format!("{username}@example.com"),
                timezone: Some(timezone.into()),
            })
            .await
            .unwrap()
    }

    /// Host `jane` (UTC), Monday 09:00-17:00, and a 30 minute event type
    /// with the given buffers.
    pub async fn monday_host(&self, buffer_before: i32, buffer_after: i32) -> (Host, EventType) {
        let host = self.host("jane", "UTC").await;
        self.availability
            .save(host.id, vec![rule(DayOfWeek::Monday, hm(9, 0), hm(17, 0))])
            .await
            .unwrap();

        let mut draft = EventTypeDraft::named("Intro call");
        draft.buffer_before_minutes = buffer_before;
        draft.buffer_after_minutes = buffer_after;
        let event_type = self.event_types.create(host.id, draft).await.unwrap();
        (host, event_type)
    }
}

pub fn unknown_id() -> Uuid {
    Uuid::from_u128(0xdead_beef)
}
