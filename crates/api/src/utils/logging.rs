use std::time::Duration;

use schedulr_domain::SchedulrError;
use tracing::{error, info, warn, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install the global tracing subscriber.
///
/// Honours `RUST_LOG`, defaulting to `info`. With `json` set, events are
/// emitted as JSON lines. Calling this twice is harmless: the second
/// subscriber is rejected and the first stays in place.
pub fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    let installed = if json {
        registry.with(tracing_subscriber::fmt::layer().json()).try_init()
    } else {
        registry.with(tracing_subscriber::fmt::layer()).try_init()
    };

    if let Err(err) = installed {
        tracing::debug!(error = %err, "tracing subscriber already installed");
    }
}

/// Log the outcome of a command execution with structured fields.
///
/// Callers must avoid forwarding guest or host personal data in `command`.
#[inline]
pub fn log_command_execution(command: &str, elapsed: Duration, error: Option<&SchedulrError>) {
    let duration_ms = u64::try_from(elapsed.as_millis()).unwrap_or(u64::MAX);

    match error {
        None => info!(command, duration_ms, "command_execution_success"),
        Some(err) if failure_level(err) == Level::WARN => warn!(
            command,
            duration_ms,
            error_kind = error_label(err),
            error = %err,
            "command_execution_failure"
        ),
        Some(err) => error!(
            command,
            duration_ms,
            error_kind = error_label(err),
            error = %err,
            "command_execution_failure"
        ),
    }
}

/// Caller mistakes are warnings; storage, configuration and internal
/// failures are errors.
#[inline]
pub const fn failure_level(error: &SchedulrError) -> Level {
    if error.is_client_error() {
        Level::WARN
    } else {
        Level::ERROR
    }
}

/// Convert a `SchedulrError` into a stable label suitable for logging.
#[inline]
pub const fn error_label(error: &SchedulrError) -> &'static str {
    error.kind()
}
