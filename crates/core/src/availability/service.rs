//! Availability service - replace-all weekly schedule

use std::collections::HashSet;
use std::sync::Arc;

use schedulr_domain::{AvailabilityRule, AvailabilityRuleInput, Result, SchedulrError};
use tracing::info;
use uuid::Uuid;

use super::ports::AvailabilityRepository;

/// Availability service
pub struct AvailabilityService {
    repository: Arc<dyn AvailabilityRepository>,
}

impl AvailabilityService {
    pub fn new(repository: Arc<dyn AvailabilityRepository>) -> Self {
        Self { repository }
    }

    /// Rules of an owner ordered Monday first
    pub async fn get(&self, owner_id: Uuid) -> Result<Vec<AvailabilityRule>> {
        let mut rules = self.repository.list_for_owner(owner_id).await?;
        rules.sort_by_key(|rule| rule.day_of_week);
        Ok(rules)
    }

    /// Replace the whole weekly schedule of an owner.
    ///
    /// # Errors
    /// `Validation` if a day appears twice, an enabled rule does not start
    /// before it ends, or more than seven rules are submitted.
    pub async fn save(
        &self,
        owner_id: Uuid,
        inputs: Vec<AvailabilityRuleInput>,
    ) -> Result<Vec<AvailabilityRule>> {
        validate_rules(&inputs)?;

        let rules: Vec<_> = inputs.into_iter().map(|input| input.into_rule(owner_id)).collect();
        let mut saved = self.repository.replace_for_owner(owner_id, rules).await?;
        saved.sort_by_key(|rule| rule.day_of_week);

        info!(
            owner_id = %owner_id,
            enabled_days = saved.iter().filter(|r| r.enabled).count(),
            "Saved availability"
        );
        Ok(saved)
    }
}

fn validate_rules(inputs: &[AvailabilityRuleInput]) -> Result<()> {
    if inputs.len() > 7 {
        return Err(SchedulrError::Validation(format!(
            "at most 7 availability rules allowed, got {}",
            inputs.len()
        )));
    }

    let mut seen = HashSet::new();
    for input in inputs {
        if !seen.insert(input.day_of_week) {
            return Err(SchedulrError::Validation(format!(
                "{} submitted more than once",
                input.day_of_week
            )));
        }
        if input.enabled && input.start_time >= input.end_time {
            return Err(SchedulrError::Validation(format!(
                "{}: start {} must be before end {}",
                input.day_of_week,
                input.start_time.format("%H:%M"),
                input.end_time.format("%H:%M")
            )));
        }
    }
    Ok(())
}
