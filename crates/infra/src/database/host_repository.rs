//! SQLite-backed implementation of the `HostRepository` port.

use std::sync::Arc;

use async_trait::async_trait;
use rusqlite::{params, Connection, OptionalExtension, Row};
use schedulr_core::HostRepository;
use schedulr_domain::{Host, Result as DomainResult, SchedulrError};
use tokio::task;
use tracing::debug;
use uuid::Uuid;

use super::columns::{bool_at, bool_to_int, map_join_error, timestamp_at, to_ts, uuid_at};
use super::manager::{map_sql_error, DbManager};
use crate::errors::is_unique_violation;

const HOST_COLUMNS: &str = "id, username, name, email, timezone, active, created_at";

/// Host accounts stored in the `hosts` table.
pub struct SqliteHostRepository {
    db: Arc<DbManager>,
}

impl SqliteHostRepository {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl HostRepository for SqliteHostRepository {
    async fn get_by_id(&self, id: Uuid) -> DomainResult<Option<Host>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Option<Host>> {
            let conn = db.get_connection()?;
            query_one(&conn, "id", &id.to_string())
        })
        .await
        .map_err(map_join_error)?
    }

    async fn get_by_username(&self, username: &str) -> DomainResult<Option<Host>> {
        let db = Arc::clone(&self.db);
        let username = username.to_string();

        task::spawn_blocking(move || -> DomainResult<Option<Host>> {
            let conn = db.get_connection()?;
            query_one(&conn, "username", &username)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn list(&self) -> DomainResult<Vec<Host>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Vec<Host>> {
            let conn = db.get_connection()?;
            let sql = format!("SELECT {HOST_COLUMNS} FROM hosts ORDER BY created_at, id");
            let mut stmt = conn.prepare(&sql).map_err(map_sql_error)?;
            let rows = stmt.query_map([], map_host_row).map_err(map_sql_error)?;
            rows.collect::<rusqlite::Result<Vec<_>>>().map_err(map_sql_error)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn create(&self, host: Host) -> DomainResult<()> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;
            conn.execute(
                "INSERT INTO hosts (id, username, name, email, timezone, active, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                params![
                    host.id.to_string(),
                    host.username,
                    host.name,
                    host.email,
                    host.timezone,
                    bool_to_int(host.active),
                    to_ts(host.created_at),
                ],
            )
            .map_err(|err| {
                if is_unique_violation(&err) {
                    SchedulrError::Validation(format!("username already taken: {}", host.username))
                } else {
                    map_sql_error(err)
                }
            })?;
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    async fn update(&self, host: Host) -> DomainResult<()> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;
            let changed = conn
                .execute(
                    "UPDATE hosts SET username = ?2, name = ?3, timezone = ?4 WHERE id = ?1",
                    params![host.id.to_string(), host.username, host.name, host.timezone],
                )
                .map_err(|err| {
                    if is_unique_violation(&err) {
                        SchedulrError::Validation(format!(
                            "username already taken: {}",
                            host.username
                        ))
                    } else {
                        map_sql_error(err)
                    }
                })?;
            if changed == 0 {
                return Err(SchedulrError::NotFound(format!("host {}", host.id)));
            }
            debug!(host_id = %host.id, "Updated host row");
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }

    async fn set_active(&self, id: Uuid, active: bool) -> DomainResult<bool> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<bool> {
            let conn = db.get_connection()?;
            let changed = conn
                .execute(
                    "UPDATE hosts SET active = ?2 WHERE id = ?1",
                    params![id.to_string(), bool_to_int(active)],
                )
                .map_err(map_sql_error)?;
            Ok(changed > 0)
        })
        .await
        .map_err(map_join_error)?
    }
}

fn query_one(conn: &Connection, column: &str, value: &str) -> DomainResult<Option<Host>> {
    let sql = format!("SELECT {HOST_COLUMNS} FROM hosts WHERE {column} = ?1");
    conn.query_row(&sql, params![value], map_host_row).optional().map_err(map_sql_error)
}

fn map_host_row(row: &Row<'_>) -> rusqlite::Result<Host> {
    Ok(Host {
        id: uuid_at(row, 0)?,
        username: row.get(1)?,
        name: row.get(2)?,
        email: row.get(3)?,
        timezone: row.get(4)?,
        active: bool_at(row, 5)?,
        created_at: timestamp_at(row, 6)?,
    })
}
