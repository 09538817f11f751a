//! Health check command

use std::sync::Arc;

use schedulr_domain::{Result as DomainResult, SchedulrError};
use serde::Serialize;
use tokio::task;

use crate::utils::command_helpers::execute_command;
use crate::AppContext;

/// Snapshot of the storage backend's state
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub database_ok: bool,
    pub database_path: String,
}

/// Probe the database with a trivial query.
pub async fn health_check(ctx: &AppContext) -> DomainResult<HealthStatus> {
    execute_command("health::health_check", || async {
        let db = Arc::clone(&ctx.db);
        task::spawn_blocking(move || db.health_check())
            .await
            .map_err(|err| SchedulrError::Internal(format!("health check task failed: {err}")))??;

        Ok(HealthStatus {
            database_ok: true,
            database_path: ctx.db.path().display().to_string(),
        })
    })
    .await
}
