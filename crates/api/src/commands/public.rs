//! Public booking page commands
//!
//! These are addressed by username and require no session. Nothing returned
//! here carries the host's email address.

use chrono::NaiveDate;
use schedulr_domain::{Booking, BookingRequest, EventType, PublicProfile, Result as DomainResult, Slot};
use uuid::Uuid;

use crate::utils::command_helpers::execute_command;
use crate::AppContext;

pub async fn get_public_profile(ctx: &AppContext, username: String) -> DomainResult<PublicProfile> {
    execute_command("public::get_public_profile", || ctx.hosts.public_profile(&username)).await
}

/// Active event types of the host.
pub async fn get_public_event_types(
    ctx: &AppContext,
    username: String,
) -> DomainResult<Vec<EventType>> {
    execute_command("public::get_public_event_types", || ctx.event_types.list_public(&username))
        .await
}

/// Bookable slots starting on `date` (host-local) and running for the
/// configured range length.
pub async fn get_slots(
    ctx: &AppContext,
    username: String,
    event_type_id: Uuid,
    date: NaiveDate,
) -> DomainResult<Vec<Slot>> {
    execute_command("public::get_slots", || {
        ctx.slot_engine.slots_for_host(&username, event_type_id, date)
    })
    .await
}

/// Commit a booking for an offered slot.
///
/// Fails with `SlotNoLongerAvailable` when the slot was taken since it was
/// offered; clients re-fetch slots on that outcome.
pub async fn book(
    ctx: &AppContext,
    username: String,
    request: BookingRequest,
) -> DomainResult<Booking> {
    execute_command("public::book", || ctx.committer.book(&username, request)).await
}
