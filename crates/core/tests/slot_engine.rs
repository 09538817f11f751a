//! Slot computation scenarios against in-memory ports

mod support;

use chrono::{Duration, NaiveDate};
use chrono_tz::Tz;
use schedulr_core::{HostProfileUpdate, SlotQuery};
use schedulr_domain::{DayOfWeek, EventTypeDraft, SchedulrError, Slot};
use support::{hm, request, rule, unknown_id, utc, Harness};

fn monday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2030, 1, 7).unwrap()
}

fn monday_query(owner_id: uuid::Uuid, event_type_id: uuid::Uuid) -> SlotQuery {
    SlotQuery {
        owner_id,
        event_type_id,
        range_start: monday(),
        range_end: monday(),
        timezone: Tz::UTC,
    }
}

fn starts(slots: &[Slot]) -> Vec<chrono::DateTime<chrono::Utc>> {
    slots.iter().map(|slot| slot.start_time).collect()
}

#[tokio::test]
async fn open_monday_yields_sixteen_half_hour_slots() {
    let h = Harness::new();
    let (host, event_type) = h.monday_host(0, 0).await;

    let slots = h.engine.compute_slots(&monday_query(host.id, event_type.id)).await.unwrap();

    assert_eq!(slots.len(), 16);
    let expected: Vec<_> = (0..16).map(|i| utc(2030, 1, 7, 9, 0) + Duration::minutes(30 * i)).collect();
    assert_eq!(starts(&slots), expected);
    assert!(slots.iter().all(|s| s.end_time - s.start_time == Duration::minutes(30)));
}

#[tokio::test]
async fn existing_booking_removes_exactly_its_slot() {
    let h = Harness::new();
    let (host, event_type) = h.monday_host(0, 0).await;
    h.committer
        .commit_booking(host.id, request(&event_type, utc(2030, 1, 7, 10, 0)))
        .await
        .unwrap();

    let slots = h.engine.compute_slots(&monday_query(host.id, event_type.id)).await.unwrap();
    let starts = starts(&slots);

    assert_eq!(slots.len(), 15);
    assert!(!starts.contains(&utc(2030, 1, 7, 10, 0)));
    assert!(starts.contains(&utc(2030, 1, 7, 9, 30)));
    assert!(starts.contains(&utc(2030, 1, 7, 10, 30)));
}

#[tokio::test]
async fn after_buffer_excludes_adjacent_slots() {
    let h = Harness::new();
    let (host, event_type) = h.monday_host(0, 15).await;
    h.committer
        .commit_booking(host.id, request(&event_type, utc(2030, 1, 7, 10, 0)))
        .await
        .unwrap();

    let slots = h.engine.compute_slots(&monday_query(host.id, event_type.id)).await.unwrap();
    let starts = starts(&slots);

    assert!(starts.contains(&utc(2030, 1, 7, 9, 0)));
    assert!(!starts.contains(&utc(2030, 1, 7, 9, 30)));
    assert!(!starts.contains(&utc(2030, 1, 7, 10, 0)));
    assert!(!starts.contains(&utc(2030, 1, 7, 10, 30)));
    assert!(starts.contains(&utc(2030, 1, 7, 11, 0)));
}

#[tokio::test]
async fn every_slot_fits_its_window_with_buffers() {
    let h = Harness::new();
    let (host, event_type) = h.monday_host(10, 20).await;

    let slots = h.engine.compute_slots(&monday_query(host.id, event_type.id)).await.unwrap();

    assert!(!slots.is_empty());
    for slot in &slots {
        assert!(slot.start_time - Duration::minutes(10) >= utc(2030, 1, 7, 9, 0));
        assert!(slot.end_time + Duration::minutes(20) <= utc(2030, 1, 7, 17, 0));
    }
    for pair in slots.windows(2) {
        assert!(pair[0].start_time <= pair[1].start_time);
    }
    for (i, slot) in slots.iter().enumerate() {
        assert!(slots[i + 1..].iter().all(|other| !slot.overlaps(other)));
    }
}

#[tokio::test]
async fn identical_queries_return_identical_slots() {
    let h = Harness::new();
    let (host, event_type) = h.monday_host(5, 5).await;
    let query = monday_query(host.id, event_type.id);

    let first = h.engine.compute_slots(&query).await.unwrap();
    let second = h.engine.compute_slots(&query).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn slots_starting_now_or_earlier_are_not_offered() {
    let h = Harness::with_now(utc(2030, 1, 7, 10, 0));
    let (host, event_type) = h.monday_host(0, 0).await;

    let slots = h.engine.compute_slots(&monday_query(host.id, event_type.id)).await.unwrap();
    assert_eq!(slots[0].start_time, utc(2030, 1, 7, 10, 30));
}

#[tokio::test]
async fn inactive_event_type_is_not_bookable() {
    let h = Harness::new();
    let (host, event_type) = h.monday_host(0, 0).await;
    h.event_types.toggle_active(host.id, event_type.id).await.unwrap();

    let err = h.engine.compute_slots(&monday_query(host.id, event_type.id)).await.unwrap_err();
    assert!(matches!(err, SchedulrError::NotBookable(_)));
}

#[tokio::test]
async fn unknown_or_foreign_event_type_is_not_found() {
    let h = Harness::new();
    let (host, event_type) = h.monday_host(0, 0).await;
    let other = h.host("bob", "UTC").await;

    let err = h.engine.compute_slots(&monday_query(host.id, unknown_id())).await.unwrap_err();
    assert!(matches!(err, SchedulrError::NotFound(_)));

    let err = h.engine.compute_slots(&monday_query(other.id, event_type.id)).await.unwrap_err();
    assert!(matches!(err, SchedulrError::NotFound(_)));
}

#[tokio::test]
async fn ranges_are_bounded() {
    let h = Harness::new();
    let (host, event_type) = h.monday_host(0, 0).await;

    let mut query = monday_query(host.id, event_type.id);
    query.range_end = monday() + Duration::days(7);
    let err = h.engine.compute_slots(&query).await.unwrap_err();
    assert!(matches!(err, SchedulrError::OutOfRange(_)));

    let far = monday() + Duration::days(120);
    query.range_start = far;
    query.range_end = far;
    let err = h.engine.compute_slots(&query).await.unwrap_err();
    assert!(matches!(err, SchedulrError::OutOfRange(_)));

    query.range_start = monday();
    query.range_end = monday() - Duration::days(1);
    let err = h.engine.compute_slots(&query).await.unwrap_err();
    assert!(matches!(err, SchedulrError::Validation(_)));
}

#[tokio::test]
async fn empty_availability_is_an_empty_answer() {
    let h = Harness::new();
    let host = h.host("jane", "UTC").await;
    let event_type = h.event_types.create(host.id, EventTypeDraft::named("Chat")).await.unwrap();

    let slots = h.engine.compute_slots(&monday_query(host.id, event_type.id)).await.unwrap();
    assert!(slots.is_empty());
}

#[tokio::test]
async fn public_lookup_covers_the_week_from_the_date() {
    let h = Harness::new();
    let (_, event_type) = h.monday_host(0, 0).await;

    // Sunday: the window reaches Monday
    let sunday = NaiveDate::from_ymd_opt(2030, 1, 6).unwrap();
    let slots = h.engine.slots_for_host("JANE", event_type.id, sunday).await.unwrap();
    assert_eq!(slots.len(), 16);

    let err = h.engine.slots_for_host("nobody", event_type.id, sunday).await.unwrap_err();
    assert!(matches!(err, SchedulrError::NotFound(_)));

    let beyond = sunday + Duration::days(200);
    let err = h.engine.slots_for_host("jane", event_type.id, beyond).await.unwrap_err();
    assert!(matches!(err, SchedulrError::OutOfRange(_)));
}

#[tokio::test]
async fn deactivated_host_has_no_public_slots() {
    let h = Harness::new();
    let (host, event_type) = h.monday_host(0, 0).await;

    let deactivated = h.hosts.toggle_active(host.id).await.unwrap();
    assert!(!deactivated.active);

    let err = h.engine.slots_for_host("jane", event_type.id, monday()).await.unwrap_err();
    assert!(matches!(err, SchedulrError::NotFound(_)));
    let err = h
        .committer
        .book("jane", request(&event_type, utc(2030, 1, 7, 9, 0)))
        .await
        .unwrap_err();
    assert!(matches!(err, SchedulrError::NotFound(_)));
    let err = h
        .committer
        .commit_booking(host.id, request(&event_type, utc(2030, 1, 7, 9, 0)))
        .await
        .unwrap_err();
    assert!(matches!(err, SchedulrError::NotFound(_)));

    assert!(h.hosts.toggle_active(host.id).await.unwrap().active);
    let slots = h.engine.slots_for_host("jane", event_type.id, monday()).await.unwrap();
    assert_eq!(slots.len(), 16);
}

#[tokio::test]
async fn timezone_change_moves_the_utc_grid() {
    let h = Harness::new();
    let (host, event_type) = h.monday_host(0, 0).await;

    let before = h.engine.slots_for_host("jane", event_type.id, monday()).await.unwrap();
    assert_eq!(before[0].start_time, utc(2030, 1, 7, 9, 0));

    h.hosts
        .update_profile(
            host.id,
            HostProfileUpdate { timezone: Some("Europe/Berlin".into()), ..Default::default() },
        )
        .await
        .unwrap();

    // 09:00 in Berlin is 08:00Z in January.
    let after = h.engine.slots_for_host("jane", event_type.id, monday()).await.unwrap();
    assert_eq!(after.len(), 16);
    assert_eq!(after[0].start_time, utc(2030, 1, 7, 8, 0));
    assert_eq!(after[15].start_time, utc(2030, 1, 7, 15, 30));
}

#[tokio::test]
async fn daylight_saving_day_uses_that_days_offsets() {
    let h = Harness::with_now(utc(2030, 3, 1, 0, 0));
    let host = h.host("nyc", "America/New_York").await;
    h.availability
        .save(host.id, vec![rule(DayOfWeek::Sunday, hm(0, 0), hm(6, 0))])
        .await
        .unwrap();
    let mut draft = EventTypeDraft::named("Hour");
    draft.duration_minutes = 60;
    let event_type = h.event_types.create(host.id, draft).await.unwrap();

    // 2030-03-10 is a Sunday; clocks spring forward at 02:00 local.
    let date = NaiveDate::from_ymd_opt(2030, 3, 10).unwrap();
    let tz: Tz = "America/New_York".parse().unwrap();
    let slots = h
        .engine
        .compute_slots(&SlotQuery {
            owner_id: host.id,
            event_type_id: event_type.id,
            range_start: date,
            range_end: date,
            timezone: tz,
        })
        .await
        .unwrap();

    // 00:00 EST (05:00Z) .. 06:00 EDT (10:00Z) holds five hours.
    assert_eq!(slots.len(), 5);
    assert_eq!(slots[0].start_time, utc(2030, 3, 10, 5, 0));
    assert_eq!(slots[4].end_time, utc(2030, 3, 10, 10, 0));

    // The following Sunday is a full six hours at the summer offset.
    let next = date + Duration::days(7);
    let slots = h
        .engine
        .compute_slots(&SlotQuery {
            owner_id: host.id,
            event_type_id: event_type.id,
            range_start: next,
            range_end: next,
            timezone: tz,
        })
        .await
        .unwrap();
    assert_eq!(slots.len(), 6);
    assert_eq!(slots[0].start_time, utc(2030, 3, 17, 4, 0));
}
