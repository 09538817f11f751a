//! Weekly availability commands (owner-authenticated)

use schedulr_domain::{AvailabilityRule, AvailabilityRuleInput, Result as DomainResult};
use uuid::Uuid;

use crate::utils::command_helpers::execute_command;
use crate::AppContext;

/// Current weekly rules of the owner, Monday first.
pub async fn get_availability(
    ctx: &AppContext,
    owner_id: Uuid,
) -> DomainResult<Vec<AvailabilityRule>> {
    execute_command("availability::get_availability", || ctx.availability.get(owner_id)).await
}

/// Replace the owner's weekly rules with `rules`.
pub async fn save_availability(
    ctx: &AppContext,
    owner_id: Uuid,
    rules: Vec<AvailabilityRuleInput>,
) -> DomainResult<Vec<AvailabilityRule>> {
    execute_command("availability::save_availability", || ctx.availability.save(owner_id, rules))
        .await
}
