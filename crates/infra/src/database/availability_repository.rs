//! SQLite-backed implementation of the `AvailabilityRepository` port.

use std::sync::Arc;

use async_trait::async_trait;
use rusqlite::{params, Row};
use schedulr_core::AvailabilityRepository;
use schedulr_domain::{format_wall_clock, AvailabilityRule, Result as DomainResult};
use tokio::task;
use uuid::Uuid;

use super::columns::{bool_at, bool_to_int, label_at, map_join_error, uuid_at, wall_clock_at};
use super::manager::{map_sql_error, DbManager};

/// Weekly rules stored in `availability_rules`, one row per (owner, day).
pub struct SqliteAvailabilityRepository {
    db: Arc<DbManager>,
}

impl SqliteAvailabilityRepository {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl AvailabilityRepository for SqliteAvailabilityRepository {
    async fn list_for_owner(&self, owner_id: Uuid) -> DomainResult<Vec<AvailabilityRule>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Vec<AvailabilityRule>> {
            let conn = db.get_connection()?;
            let mut stmt = conn
                .prepare(
                    "SELECT id, owner_id, day_of_week, start_time, end_time, enabled
                     FROM availability_rules
                     WHERE owner_id = ?1",
                )
                .map_err(map_sql_error)?;
            let rules = stmt
                .query_map(params![owner_id.to_string()], map_rule_row)
                .map_err(map_sql_error)?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(map_sql_error)?;
            Ok(rules)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn replace_for_owner(
        &self,
        owner_id: Uuid,
        rules: Vec<AvailabilityRule>,
    ) -> DomainResult<Vec<AvailabilityRule>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Vec<AvailabilityRule>> {
            let mut conn = db.get_connection()?;
            let tx = conn.transaction().map_err(map_sql_error)?;

            tx.execute(
                "DELETE FROM availability_rules WHERE owner_id = ?1",
                params![owner_id.to_string()],
            )
            .map_err(map_sql_error)?;
            {
                let mut insert = tx
                    .prepare(
                        "INSERT INTO availability_rules
                            (id, owner_id, day_of_week, start_time, end_time, enabled)
                         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
                    )
                    .map_err(map_sql_error)?;
                for rule in &rules {
                    insert
                        .execute(params![
                            rule.id.to_string(),
                            owner_id.to_string(),
                            rule.day_of_week.to_string(),
                            format_wall_clock(rule.start_time),
                            format_wall_clock(rule.end_time),
                            bool_to_int(rule.enabled),
                        ])
                        .map_err(map_sql_error)?;
                }
            }
            tx.commit().map_err(map_sql_error)?;

            Ok(rules)
        })
        .await
        .map_err(map_join_error)?
    }
}

fn map_rule_row(row: &Row<'_>) -> rusqlite::Result<AvailabilityRule> {
    Ok(AvailabilityRule {
        id: uuid_at(row, 0)?,
        owner_id: uuid_at(row, 1)?,
        day_of_week: label_at(row, 2)?,
        start_time: wall_clock_at(row, 3)?,
        end_time: wall_clock_at(row, 4)?,
        enabled: bool_at(row, 5)?,
    })
}
