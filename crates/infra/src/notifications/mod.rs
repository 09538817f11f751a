//! Post-commit collaborators: notification delivery and meeting links

pub mod logging_notifier;
pub mod meeting_links;

pub use logging_notifier::{compose_cancellation, compose_confirmation, LoggingNotifier, Message};
pub use meeting_links::GeneratedMeetingLinkProvisioner;
