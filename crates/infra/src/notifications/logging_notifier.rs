//! Notifier that composes booking emails and writes them to the log.
//!
//! Mail transport is an outer concern; this adapter keeps the message
//! content in one place and makes every notification observable.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use schedulr_core::BookingNotifier;
use schedulr_domain::{Booking, Host, Result as DomainResult};
use tracing::{info, warn};

/// A composed notification
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub to: String,
    pub subject: String,
    pub body: String,
}

/// The host's wall clock, or UTC when the stored zone no longer parses.
fn host_zone(host: &Host) -> Tz {
    host.tz().unwrap_or_else(|err| {
        warn!(host_id = %host.id, error = %err, "Formatting notification in UTC");
        Tz::UTC
    })
}

fn local_start(start: DateTime<Utc>, zone: Tz) -> String {
    start.with_timezone(&zone).format("%A, %B %-d, %Y %H:%M").to_string()
}

/// Guest confirmation and host notice for a new booking.
///
/// Times are rendered in the host's timezone.
pub fn compose_confirmation(booking: &Booking, host: &Host) -> [Message; 2] {
    let zone = host_zone(host);
    let when = format!(
        "{} - {} {}",
        local_start(booking.start_time, zone),
        booking.end_time.with_timezone(&zone).format("%H:%M"),
        zone.name()
    );
    let location = booking.meeting_link.as_deref().unwrap_or("to be announced");
    let notes = booking.notes.as_deref().map(|n| format!("\nNotes: {n}")).unwrap_or_default();

    [
        Message {
            to: booking.guest_email.clone(),
            subject: format!("Meeting Confirmed: {}", booking.event_type_name),
            body: format!(
                "Hi {},\n\nYour meeting with {} is confirmed.\nWhen: {when}\nWhere: {location}{notes}",
                booking.guest_name, host.name
            ),
        },
        Message {
            to: host.email.clone(),
            subject: format!("New Meeting Booked: {}", booking.event_type_name),
            body: format!(
                "Hi {},\n\n{} <{}> booked a meeting with you.\nWhen: {when}\nWhere: {location}{notes}",
                host.name, booking.guest_name, booking.guest_email
            ),
        },
    ]
}

/// Guest notice that the host cancelled.
pub fn compose_cancellation(booking: &Booking, host: &Host) -> Message {
    let reason = booking
        .cancellation_reason
        .as_deref()
        .map(|r| format!("\nReason: {r}"))
        .unwrap_or_default();

    let zone = host_zone(host);

    Message {
        to: booking.guest_email.clone(),
        subject: format!("Meeting Cancelled: {}", booking.event_type_name),
        body: format!(
            "Hi {},\n\nYour meeting with {} on {} {} has been cancelled.{reason}",
            booking.guest_name,
            host.name,
            local_start(booking.start_time, zone),
            zone.name()
        ),
    }
}

/// [`BookingNotifier`] that logs each composed message
#[derive(Debug, Default, Clone, Copy)]
pub struct LoggingNotifier;

impl LoggingNotifier {
    pub const fn new() -> Self {
        Self
    }

    fn emit(booking: &Booking, message: &Message) {
        info!(
            booking_id = %booking.id,
            to = %message.to,
            subject = %message.subject,
            body = %message.body,
            "notification"
        );
    }
}

#[async_trait]
impl BookingNotifier for LoggingNotifier {
    async fn booking_committed(&self, booking: &Booking, host: &Host) -> DomainResult<()> {
        for message in &compose_confirmation(booking, host) {
            Self::emit(booking, message);
        }
        Ok(())
    }

    async fn booking_cancelled(&self, booking: &Booking, host: &Host) -> DomainResult<()> {
        Self::emit(booking, &compose_cancellation(booking, host));
        Ok(())
    }
}
