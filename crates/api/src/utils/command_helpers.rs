//! Command execution helpers
//!
//! Every command goes through [`execute_command`] so timing and outcome
//! logging stay uniform across the surface.

use std::future::Future;
use std::time::Instant;

use schedulr_domain::Result as DomainResult;

use crate::utils::logging::log_command_execution;

/// Execute a command, timing it and logging the outcome.
///
/// # Example
///
/// ```rust,ignore
/// pub async fn my_command(ctx: &AppContext, owner_id: Uuid) -> DomainResult<Vec<EventType>> {
///     execute_command("event_types::my_command", || ctx.event_types.list(owner_id)).await
/// }
/// ```
pub async fn execute_command<F, Fut, T>(command_name: &str, command_fn: F) -> DomainResult<T>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = DomainResult<T>>,
{
    let start = Instant::now();

    let result = command_fn().await;

    log_command_execution(command_name, start.elapsed(), result.as_ref().err());

    result
}
