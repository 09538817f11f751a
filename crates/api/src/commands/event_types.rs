//! Event type management commands (owner-authenticated)

use schedulr_domain::{EventType, EventTypeDraft, Result as DomainResult};
use uuid::Uuid;

use crate::utils::command_helpers::execute_command;
use crate::AppContext;

pub async fn list_event_types(ctx: &AppContext, owner_id: Uuid) -> DomainResult<Vec<EventType>> {
    execute_command("event_types::list_event_types", || ctx.event_types.list(owner_id)).await
}

pub async fn get_event_type(
    ctx: &AppContext,
    owner_id: Uuid,
    event_type_id: Uuid,
) -> DomainResult<EventType> {
    execute_command("event_types::get_event_type", || ctx.event_types.get(owner_id, event_type_id))
        .await
}

pub async fn create_event_type(
    ctx: &AppContext,
    owner_id: Uuid,
    draft: EventTypeDraft,
) -> DomainResult<EventType> {
    execute_command("event_types::create_event_type", || ctx.event_types.create(owner_id, draft))
        .await
}

pub async fn update_event_type(
    ctx: &AppContext,
    owner_id: Uuid,
    event_type_id: Uuid,
    draft: EventTypeDraft,
) -> DomainResult<EventType> {
    execute_command("event_types::update_event_type", || {
        ctx.event_types.update(owner_id, event_type_id, draft)
    })
    .await
}

/// Delete an event type. Existing bookings keep their snapshot.
pub async fn delete_event_type(
    ctx: &AppContext,
    owner_id: Uuid,
    event_type_id: Uuid,
) -> DomainResult<()> {
    execute_command("event_types::delete_event_type", || {
        ctx.event_types.delete(owner_id, event_type_id)
    })
    .await
}

/// Flip the active flag and return the updated event type.
pub async fn toggle_event_type(
    ctx: &AppContext,
    owner_id: Uuid,
    event_type_id: Uuid,
) -> DomainResult<EventType> {
    execute_command("event_types::toggle_event_type", || {
        ctx.event_types.toggle_active(owner_id, event_type_id)
    })
    .await
}
