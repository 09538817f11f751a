//! Fire-and-forget side effects of booking changes
//!
//! Meeting-link provisioning and notification run on a spawned task after the
//! ledger write has completed. Their failures are logged and never reach the
//! caller of the commit or cancellation.

use std::sync::Arc;

use schedulr_domain::{Booking, Host};
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use super::ports::{BookingNotifier, BookingRepository, MeetingLinkProvisioner};

/// Dispatches post-commit work onto the runtime
pub struct PostCommitDispatcher {
    bookings: Arc<dyn BookingRepository>,
    notifier: Arc<dyn BookingNotifier>,
    provisioner: Arc<dyn MeetingLinkProvisioner>,
}

impl PostCommitDispatcher {
    pub fn new(
        bookings: Arc<dyn BookingRepository>,
        notifier: Arc<dyn BookingNotifier>,
        provisioner: Arc<dyn MeetingLinkProvisioner>,
    ) -> Self {
        Self { bookings, notifier, provisioner }
    }

    /// Provision a meeting link for video locations, then notify guest and
    /// host. The returned handle is only useful to tests; callers drop it.
    pub fn booking_committed(&self, booking: Booking, host: Host) -> JoinHandle<()> {
        let bookings = Arc::clone(&self.bookings);
        let notifier = Arc::clone(&self.notifier);
        let provisioner = Arc::clone(&self.provisioner);

        tokio::spawn(async move {
            let mut booking = booking;

            if booking.location_type.is_video_provider() {
                match provisioner.provision(&booking).await {
                    Ok(link) => match bookings.set_meeting_link(booking.id, &link).await {
                        Ok(()) => {
                            debug!(booking_id = %booking.id, "Attached meeting link");
                            booking.meeting_link = Some(link);
                        }
                        Err(err) => {
                            warn!(booking_id = %booking.id, error = %err, "Failed to store meeting link");
                        }
                    },
                    Err(err) => {
                        warn!(booking_id = %booking.id, error = %err, "Meeting link provisioning failed");
                    }
                }
            }

            if let Err(err) = notifier.booking_committed(&booking, &host).await {
                warn!(booking_id = %booking.id, error = %err, "Booking confirmation not delivered");
            }
        })
    }

    /// Notify the guest that the host cancelled.
    pub fn booking_cancelled(&self, booking: Booking, host: Host) -> JoinHandle<()> {
        let notifier = Arc::clone(&self.notifier);

        tokio::spawn(async move {
            if let Err(err) = notifier.booking_cancelled(&booking, &host).await {
                warn!(booking_id = %booking.id, error = %err, "Cancellation notice not delivered");
            }
        })
    }
}
