//! Port interfaces for host accounts
//!
//! Identity and session handling live outside this crate; hosts are looked
//! up by id (authenticated owner) or username (public pages).

use async_trait::async_trait;
use schedulr_domain::{Host, Result};
use uuid::Uuid;

/// Trait for host persistence and retrieval
#[async_trait]
pub trait HostRepository: Send + Sync {
    /// Get host by ID
    async fn get_by_id(&self, id: Uuid) -> Result<Option<Host>>;

    /// Get host by (lowercase) username
    async fn get_by_username(&self, username: &str) -> Result<Option<Host>>;

    /// All hosts, oldest first
    async fn list(&self) -> Result<Vec<Host>>;

    /// Create a new host; fails with `Validation` if the username is taken
    async fn create(&self, host: Host) -> Result<()>;

    /// Overwrite name, username and timezone. `NotFound` for an unknown id,
    /// `Validation` if the new username is taken.
    async fn update(&self, host: Host) -> Result<()>;

    /// Set the active flag. Returns `false` when no host has that id.
    async fn set_active(&self, id: Uuid, active: bool) -> Result<bool>;
}
