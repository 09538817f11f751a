//! Port interfaces for the event type catalog

use async_trait::async_trait;
use schedulr_domain::{EventType, Result};
use uuid::Uuid;

/// Trait for event type persistence and retrieval
#[async_trait]
pub trait EventTypeRepository: Send + Sync {
    /// Get event type by ID regardless of owner
    async fn get(&self, id: Uuid) -> Result<Option<EventType>>;

    /// Event types of an owner in creation order
    async fn list_for_owner(&self, owner_id: Uuid, active_only: bool) -> Result<Vec<EventType>>;

    /// Insert a new event type
    async fn insert(&self, event_type: EventType) -> Result<()>;

    /// Overwrite an existing event type; `NotFound` if it vanished
    async fn update(&self, event_type: EventType) -> Result<()>;

    /// Delete an event type, returning whether a row was removed
    async fn delete(&self, id: Uuid) -> Result<bool>;
}
