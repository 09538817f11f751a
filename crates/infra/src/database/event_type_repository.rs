//! SQLite-backed implementation of the `EventTypeRepository` port.

use std::sync::Arc;

use async_trait::async_trait;
use rusqlite::{params, OptionalExtension, Row};
use schedulr_core::EventTypeRepository;
use schedulr_domain::{EventType, Result as DomainResult, SchedulrError};
use tokio::task;
use uuid::Uuid;

use super::columns::{
    bool_at, bool_to_int, label_at, map_join_error, minutes_at, timestamp_at, to_ts, uuid_at,
};
use super::manager::{map_sql_error, DbManager};

const EVENT_TYPE_COLUMNS: &str = "id, owner_id, name, description, duration_minutes,
    buffer_before_minutes, buffer_after_minutes, location_type, location_details, active, color,
    created_at, updated_at";

/// Event type catalog stored in `event_types`.
pub struct SqliteEventTypeRepository {
    db: Arc<DbManager>,
}

impl SqliteEventTypeRepository {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl EventTypeRepository for SqliteEventTypeRepository {
    async fn get(&self, id: Uuid) -> DomainResult<Option<EventType>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Option<EventType>> {
            let conn = db.get_connection()?;
            let sql = format!("SELECT {EVENT_TYPE_COLUMNS} FROM event_types WHERE id = ?1");
            conn.query_row(&sql, params![id.to_string()], map_event_type_row)
                .optional()
                .map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn list_for_owner(&self, owner_id: Uuid, active_only: bool) -> DomainResult<Vec<EventType>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Vec<EventType>> {
            let conn = db.get_connection()?;
            let sql = format!(
                "SELECT {EVENT_TYPE_COLUMNS} FROM event_types
                 WHERE owner_id = ?1 AND (?2 = 0 OR active = 1)
                 ORDER BY created_at, id"
            );
            let mut stmt = conn.prepare(&sql).map_err(map_sql_error)?;
            let event_types = stmt
                .query_map(params![owner_id.to_string(), bool_to_int(active_only)], map_event_type_row)
                .map_err(map_sql_error)?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(map_sql_error)?;
            Ok(event_types)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn insert(&self, event_type: EventType) -> DomainResult<()> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;
            conn.execute(
                "INSERT INTO event_types (
                    id, owner_id, name, description, duration_minutes, buffer_before_minutes,
                    buffer_after_minutes, location_type, location_details, active, color,
                    created_at, updated_at
                 ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13)",
                params![
                    event_type.id.to_string(),
                    event_type.owner_id.to_string(),
                    event_type.name,
                    event_type.description,
                    event_type.duration_minutes,
                    event_type.buffer_before_minutes,
                    event_type.buffer_after_minutes,
                    event_type.location_type.to_string(),
                    event_type.location_details,
                    bool_to_int(event_type.active),
                    event_type.color,
                    to_ts(event_type.created_at),
                    to_ts(event_type.updated_at),
                ],
            )
            .map_err(map_sql_error)?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    async fn update(&self, event_type: EventType) -> DomainResult<()> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;
            let changed = conn
                .execute(
                    "UPDATE event_types SET
                        name = ?2, description = ?3, duration_minutes = ?4,
                        buffer_before_minutes = ?5, buffer_after_minutes = ?6,
                        location_type = ?7, location_details = ?8, active = ?9, color = ?10,
                        updated_at = ?11
                     WHERE id = ?1",
                    params![
                        event_type.id.to_string(),
                        event_type.name,
                        event_type.description,
                        event_type.duration_minutes,
                        event_type.buffer_before_minutes,
                        event_type.buffer_after_minutes,
                        event_type.location_type.to_string(),
                        event_type.location_details,
                        bool_to_int(event_type.active),
                        event_type.color,
                        to_ts(event_type.updated_at),
                    ],
                )
                .map_err(map_sql_error)?;

            if changed == 0 {
                return Err(SchedulrError::NotFound(format!("event type {}", event_type.id)));
            }
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    async fn delete(&self, id: Uuid) -> DomainResult<bool> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<bool> {
            let conn = db.get_connection()?;
            let changed = conn
                .execute("DELETE FROM event_types WHERE id = ?1", params![id.to_string()])
                .map_err(map_sql_error)?;
            Ok(changed > 0)
        })
        .await
        .map_err(map_join_error)?
    }
}

fn map_event_type_row(row: &Row<'_>) -> rusqlite::Result<EventType> {
    Ok(EventType {
        id: uuid_at(row, 0)?,
        owner_id: uuid_at(row, 1)?,
        name: row.get(2)?,
        description: row.get(3)?,
        duration_minutes: minutes_at(row, 4)?,
        buffer_before_minutes: minutes_at(row, 5)?,
        buffer_after_minutes: minutes_at(row, 6)?,
        location_type: label_at(row, 7)?,
        location_details: row.get(8)?,
        active: bool_at(row, 9)?,
        color: row.get(10)?,
        created_at: timestamp_at(row, 11)?,
        updated_at: timestamp_at(row, 12)?,
    })
}
