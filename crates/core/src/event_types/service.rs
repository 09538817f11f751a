//! Event type service - owner CRUD and the public catalog
//!
//! Lookups by a non-owner report `NotFound` rather than `Forbidden` so that
//! ids of other hosts' event types are not disclosed.

use std::sync::Arc;

use schedulr_domain::{EventType, EventTypeDraft, Result, SchedulrError};
use tracing::info;
use uuid::Uuid;

use super::ports::EventTypeRepository;
use crate::clock::Clock;
use crate::hosts::ports::HostRepository;

/// Event type service
pub struct EventTypeService {
    repository: Arc<dyn EventTypeRepository>,
    hosts: Arc<dyn HostRepository>,
    clock: Arc<dyn Clock>,
}

impl EventTypeService {
    pub fn new(
        repository: Arc<dyn EventTypeRepository>,
        hosts: Arc<dyn HostRepository>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self { repository, hosts, clock }
    }

    /// All event types of an owner, active or not
    pub async fn list(&self, owner_id: Uuid) -> Result<Vec<EventType>> {
        self.repository.list_for_owner(owner_id, false).await
    }

    /// Active event types of a host, for the public booking page
    pub async fn list_public(&self, username: &str) -> Result<Vec<EventType>> {
        let host = self
            .hosts
            .get_by_username(&username.trim().to_lowercase())
            .await?
            .filter(|host| host.active)
            .ok_or_else(|| SchedulrError::NotFound(format!("host {username}")))?;
        self.repository.list_for_owner(host.id, true).await
    }

    /// Get an event type owned by `owner_id`
    pub async fn get(&self, owner_id: Uuid, id: Uuid) -> Result<EventType> {
        self.repository
            .get(id)
            .await?
            .filter(|event_type| event_type.owner_id == owner_id)
            .ok_or_else(|| SchedulrError::NotFound(format!("event type {id}")))
    }

    pub async fn create(&self, owner_id: Uuid, draft: EventTypeDraft) -> Result<EventType> {
        let event_type = EventType::from_draft(owner_id, draft, self.clock.now())?;
        self.repository.insert(event_type.clone()).await?;

        info!(owner_id = %owner_id, event_type_id = %event_type.id, "Created event type");
        Ok(event_type)
    }

    /// Replace the editable fields; id and active flag are kept.
    ///
    /// Existing bookings keep their own snapshot and are unaffected.
    pub async fn update(&self, owner_id: Uuid, id: Uuid, draft: EventTypeDraft) -> Result<EventType> {
        let mut event_type = self.get(owner_id, id).await?;
        event_type.apply_draft(draft, self.clock.now())?;
        self.repository.update(event_type.clone()).await?;

        info!(owner_id = %owner_id, event_type_id = %id, "Updated event type");
        Ok(event_type)
    }

    /// Delete an event type. Bookings made against it survive.
    pub async fn delete(&self, owner_id: Uuid, id: Uuid) -> Result<()> {
        self.get(owner_id, id).await?;
        if !self.repository.delete(id).await? {
            return Err(SchedulrError::NotFound(format!("event type {id}")));
        }

        info!(owner_id = %owner_id, event_type_id = %id, "Deleted event type");
        Ok(())
    }

    /// Flip the active flag
    pub async fn toggle_active(&self, owner_id: Uuid, id: Uuid) -> Result<EventType> {
        let mut event_type = self.get(owner_id, id).await?;
        event_type.active = !event_type.active;
        event_type.updated_at = self.clock.now();
        self.repository.update(event_type.clone()).await?;

        info!(
            owner_id = %owner_id,
            event_type_id = %id,
            active = event_type.active,
            "Toggled event type"
        );
        Ok(event_type)
    }
}
