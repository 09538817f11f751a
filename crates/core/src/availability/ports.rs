//! Port interfaces for weekly availability

use async_trait::async_trait;
use schedulr_domain::{AvailabilityRule, Result};
use uuid::Uuid;

/// Trait for availability rule persistence
#[async_trait]
pub trait AvailabilityRepository: Send + Sync {
    /// All rules for an owner, enabled or not
    async fn list_for_owner(&self, owner_id: Uuid) -> Result<Vec<AvailabilityRule>>;

    /// Atomically replace every rule of an owner
    async fn replace_for_owner(
        &self,
        owner_id: Uuid,
        rules: Vec<AvailabilityRule>,
    ) -> Result<Vec<AvailabilityRule>>;
}
