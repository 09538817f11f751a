//! Booking management commands (owner-authenticated)

use schedulr_domain::{Booking, CancelRequest, Result as DomainResult};
use uuid::Uuid;

use crate::utils::command_helpers::execute_command;
use crate::AppContext;

/// Every booking of the owner, newest start first.
pub async fn list_bookings(ctx: &AppContext, owner_id: Uuid) -> DomainResult<Vec<Booking>> {
    execute_command("bookings::list_bookings", || ctx.bookings.list_all(owner_id)).await
}

pub async fn list_upcoming_bookings(
    ctx: &AppContext,
    owner_id: Uuid,
) -> DomainResult<Vec<Booking>> {
    execute_command("bookings::list_upcoming_bookings", || ctx.bookings.list_upcoming(owner_id))
        .await
}

pub async fn list_past_bookings(ctx: &AppContext, owner_id: Uuid) -> DomainResult<Vec<Booking>> {
    execute_command("bookings::list_past_bookings", || ctx.bookings.list_past(owner_id)).await
}

pub async fn get_booking(
    ctx: &AppContext,
    owner_id: Uuid,
    booking_id: Uuid,
) -> DomainResult<Booking> {
    execute_command("bookings::get_booking", || ctx.bookings.get(owner_id, booking_id)).await
}

/// Cancel a booked booking. A second cancel yields `InvalidState`.
pub async fn cancel_booking(
    ctx: &AppContext,
    owner_id: Uuid,
    booking_id: Uuid,
    request: CancelRequest,
) -> DomainResult<Booking> {
    execute_command("bookings::cancel_booking", || {
        ctx.bookings.cancel_booking(booking_id, owner_id, request.reason)
    })
    .await
}
