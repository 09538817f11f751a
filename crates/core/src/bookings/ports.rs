//! Port interfaces for the booking ledger and post-commit collaborators

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use schedulr_domain::{Booking, Host, Result};
use uuid::Uuid;

/// Trait for booking persistence
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Get booking by ID
    async fn get(&self, id: Uuid) -> Result<Option<Booking>>;

    /// Every booking of an owner, newest start first
    async fn list_for_owner(&self, owner_id: Uuid) -> Result<Vec<Booking>>;

    /// `Booked` bookings of an owner whose buffered interval intersects
    /// `[from, to)`, ordered by start
    async fn list_booked_between(
        &self,
        owner_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<Booking>>;

    /// Insert `booking` only if no `Booked` booking of the same owner
    /// conflicts with it (buffers on both sides). The check and the insert
    /// must be a single atomic step.
    ///
    /// Fails with `SlotNoLongerAvailable` on conflict.
    async fn insert_if_free(&self, booking: Booking) -> Result<Booking>;

    /// Transition a `Booked` booking to `Cancelled`. Returns `None` when the
    /// booking is not currently `Booked`.
    async fn cancel(
        &self,
        id: Uuid,
        reason: Option<String>,
        at: DateTime<Utc>,
    ) -> Result<Option<Booking>>;

    /// Attach a provisioned meeting link
    async fn set_meeting_link(&self, id: Uuid, link: &str) -> Result<()>;
}

/// Notification delivery (email, calendar invite)
#[async_trait]
pub trait BookingNotifier: Send + Sync {
    /// A booking was committed
    async fn booking_committed(&self, booking: &Booking, host: &Host) -> Result<()>;

    /// A booking was cancelled by its host
    async fn booking_cancelled(&self, booking: &Booking, host: &Host) -> Result<()>;
}

/// Video-provider meeting link creation
#[async_trait]
pub trait MeetingLinkProvisioner: Send + Sync {
    /// Create a meeting for `booking` and return its join link
    async fn provision(&self, booking: &Booking) -> Result<String>;
}
