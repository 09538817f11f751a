//! SQLite-backed implementation of the `BookingRepository` port.
//!
//! Every booking row stores its buffered interval in `blocked_start` /
//! `blocked_end`, so conflict checks are a single indexed range predicate.
//! Only `booked` and `cancelled` are ever written; completion is derived.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row, TransactionBehavior};
use schedulr_core::BookingRepository;
use schedulr_domain::{Booking, BookingStatus, Result as DomainResult, SchedulrError};
use tokio::task;
use tracing::debug;
use uuid::Uuid;

use super::columns::{label_at, map_join_error, minutes_at, timestamp_at, to_ts, uuid_at};
use super::manager::{map_sql_error, DbManager};

const BOOKING_COLUMNS: &str = "id, owner_id, event_type_id, event_type_name, duration_minutes,
    buffer_before_minutes, buffer_after_minutes, location_type, guest_name, guest_email,
    start_time, end_time, status, notes, meeting_link, cancellation_reason, created_at, updated_at";

/// Booking ledger stored in `bookings`.
pub struct SqliteBookingRepository {
    db: Arc<DbManager>,
}

impl SqliteBookingRepository {
    pub fn new(db: Arc<DbManager>) -> Self {
        Self { db }
    }
}

#[async_trait]
impl BookingRepository for SqliteBookingRepository {
    async fn get(&self, id: Uuid) -> DomainResult<Option<Booking>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Option<Booking>> {
            let conn = db.get_connection()?;
            get_booking(&conn, id)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn list_for_owner(&self, owner_id: Uuid) -> DomainResult<Vec<Booking>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Vec<Booking>> {
            let conn = db.get_connection()?;
            let sql = format!(
                "SELECT {BOOKING_COLUMNS} FROM bookings
                 WHERE owner_id = ?1
                 ORDER BY start_time DESC, id DESC"
            );
            let mut stmt = conn.prepare(&sql).map_err(map_sql_error)?;
            let bookings = stmt
                .query_map(params![owner_id.to_string()], map_booking_row)
                .map_err(map_sql_error)?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(map_sql_error)?;
            Ok(bookings)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn list_booked_between(
        &self,
        owner_id: Uuid,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> DomainResult<Vec<Booking>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Vec<Booking>> {
            let conn = db.get_connection()?;
            let sql = format!(
                "SELECT {BOOKING_COLUMNS} FROM bookings
                 WHERE owner_id = ?1 AND status = 'booked'
                   AND blocked_start < ?3 AND blocked_end > ?2
                 ORDER BY start_time"
            );
            let mut stmt = conn.prepare(&sql).map_err(map_sql_error)?;
            let bookings = stmt
                .query_map(params![owner_id.to_string(), to_ts(from), to_ts(to)], map_booking_row)
                .map_err(map_sql_error)?
                .collect::<rusqlite::Result<Vec<_>>>()
                .map_err(map_sql_error)?;
            Ok(bookings)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn insert_if_free(&self, booking: Booking) -> DomainResult<Booking> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Booking> {
            let mut conn = db.get_connection()?;
            // IMMEDIATE takes the write lock up front, so no other writer can
            // slip a booking in between the check and the insert.
            let tx = conn
                .transaction_with_behavior(TransactionBehavior::Immediate)
                .map_err(map_sql_error)?;

            let (blocked_start, blocked_end) = booking.blocked_interval();
            let conflicts: i64 = tx
                .query_row(
                    "SELECT COUNT(*) FROM bookings
                     WHERE owner_id = ?1 AND status = 'booked'
                       AND blocked_start < ?3 AND blocked_end > ?2",
                    params![booking.owner_id.to_string(), to_ts(blocked_start), to_ts(blocked_end)],
                    |row| row.get(0),
                )
                .map_err(map_sql_error)?;
            if conflicts > 0 {
                debug!(booking_id = %booking.id, conflicts, "Insert rejected by overlap check");
                return Err(SchedulrError::SlotNoLongerAvailable(format!(
                    "{} overlaps an existing booking",
                    booking.start_time
                )));
            }

            insert_booking(&tx, &booking)?;
            tx.commit().map_err(map_sql_error)?;
            Ok(booking)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn cancel(
        &self,
        id: Uuid,
        reason: Option<String>,
        at: DateTime<Utc>,
    ) -> DomainResult<Option<Booking>> {
        let db = Arc::clone(&self.db);

        task::spawn_blocking(move || -> DomainResult<Option<Booking>> {
            let mut conn = db.get_connection()?;
            let tx = conn
                .transaction_with_behavior(TransactionBehavior::Immediate)
                .map_err(map_sql_error)?;

            let changed = tx
                .execute(
                    "UPDATE bookings
                     SET status = 'cancelled', cancellation_reason = ?2, updated_at = ?3
                     WHERE id = ?1 AND status = 'booked'",
                    params![id.to_string(), reason, to_ts(at)],
                )
                .map_err(map_sql_error)?;
            if changed == 0 {
                return Ok(None);
            }

            let cancelled = get_booking(&tx, id)?;
            tx.commit().map_err(map_sql_error)?;
            Ok(cancelled)
        })
        .await
        .map_err(map_join_error)?
    }

    async fn set_meeting_link(&self, id: Uuid, link: &str) -> DomainResult<()> {
        let db = Arc::clone(&self.db);
        let link = link.to_string();

        task::spawn_blocking(move || -> DomainResult<()> {
            let conn = db.get_connection()?;
            let changed = conn
                .execute(
                    "UPDATE bookings SET meeting_link = ?2 WHERE id = ?1",
                    params![id.to_string(), link],
                )
                .map_err(map_sql_error)?;
            if changed == 0 {
                return Err(SchedulrError::NotFound(format!("booking {id}")));
            }
            Ok(())
        })
        .await
        .map_err(map_join_error)?
    }
}

fn get_booking(conn: &Connection, id: Uuid) -> DomainResult<Option<Booking>> {
    let sql = format!("SELECT {BOOKING_COLUMNS} FROM bookings WHERE id = ?1");
    conn.query_row(&sql, params![id.to_string()], map_booking_row)
        .optional()
        .map_err(map_sql_error)
}

fn insert_booking(conn: &Connection, booking: &Booking) -> DomainResult<()> {
    let (blocked_start, blocked_end) = booking.blocked_interval();
    conn.execute(
        "INSERT INTO bookings (
            id, owner_id, event_type_id, event_type_name, duration_minutes,
            buffer_before_minutes, buffer_after_minutes, location_type, guest_name, guest_email,
            start_time, end_time, blocked_start, blocked_end, status, notes, meeting_link,
            cancellation_reason, created_at, updated_at
         ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15, ?16, ?17,
                   ?18, ?19, ?20)",
        params![
            booking.id.to_string(),
            booking.owner_id.to_string(),
            booking.event_type_id.to_string(),
            booking.event_type_name,
            booking.duration_minutes,
            booking.buffer_before_minutes,
            booking.buffer_after_minutes,
            booking.location_type.to_string(),
            booking.guest_name,
            booking.guest_email,
            to_ts(booking.start_time),
            to_ts(booking.end_time),
            to_ts(blocked_start),
            to_ts(blocked_end),
            stored_status(booking.status),
            booking.notes,
            booking.meeting_link,
            booking.cancellation_reason,
            to_ts(booking.created_at),
            to_ts(booking.updated_at),
        ],
    )
    .map_err(map_sql_error)?;
    Ok(())
}

/// `Completed` is never persisted; a finished booking stays `booked`.
const fn stored_status(status: BookingStatus) -> &'static str {
    match status {
        BookingStatus::Cancelled => "cancelled",
        BookingStatus::Booked | BookingStatus::Completed => "booked",
    }
}

fn map_booking_row(row: &Row<'_>) -> rusqlite::Result<Booking> {
    Ok(Booking {
        id: uuid_at(row, 0)?,
        owner_id: uuid_at(row, 1)?,
        event_type_id: uuid_at(row, 2)?,
        event_type_name: row.get(3)?,
        duration_minutes: minutes_at(row, 4)?,
        buffer_before_minutes: minutes_at(row, 5)?,
        buffer_after_minutes: minutes_at(row, 6)?,
        location_type: label_at(row, 7)?,
        guest_name: row.get(8)?,
        guest_email: row.get(9)?,
        start_time: timestamp_at(row, 10)?,
        end_time: timestamp_at(row, 11)?,
        status: label_at(row, 12)?,
        notes: row.get(13)?,
        meeting_link: row.get(14)?,
        cancellation_reason: row.get(15)?,
        created_at: timestamp_at(row, 16)?,
        updated_at: timestamp_at(row, 17)?,
    })
}
