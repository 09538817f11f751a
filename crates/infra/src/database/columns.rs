//! Column codecs shared by the SQLite repositories
//!
//! Instants are stored as UTC unix seconds, ids as hyphenated UUID text and
//! enums by their lowercase `Display` form.

use std::fmt::Display;
use std::str::FromStr;

use chrono::{DateTime, NaiveTime, Utc};
use rusqlite::types::Type;
use rusqlite::Row;
use schedulr_domain::{parse_wall_clock, SchedulrError};
use tokio::task;
use uuid::Uuid;

pub(crate) fn to_ts(value: DateTime<Utc>) -> i64 {
    value.timestamp()
}

pub(crate) fn bool_to_int(value: bool) -> i64 {
    i64::from(value)
}

fn conversion_error(idx: usize, ty: Type, err: impl Into<Box<dyn std::error::Error + Send + Sync>>) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(idx, ty, err.into())
}

pub(crate) fn uuid_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<Uuid> {
    let raw: String = row.get(idx)?;
    Uuid::parse_str(&raw).map_err(|e| conversion_error(idx, Type::Text, e))
}

pub(crate) fn timestamp_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let secs: i64 = row.get(idx)?;
    DateTime::<Utc>::from_timestamp(secs, 0).ok_or_else(|| {
        conversion_error(idx, Type::Integer, format!("timestamp out of range: {secs}"))
    })
}

pub(crate) fn wall_clock_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<NaiveTime> {
    let raw: String = row.get(idx)?;
    parse_wall_clock(&raw).map_err(|e| conversion_error(idx, Type::Text, e))
}

pub(crate) fn bool_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<bool> {
    Ok(row.get::<_, i64>(idx)? != 0)
}

pub(crate) fn minutes_at(row: &Row<'_>, idx: usize) -> rusqlite::Result<u32> {
    let raw: i64 = row.get(idx)?;
    u32::try_from(raw).map_err(|e| conversion_error(idx, Type::Integer, e))
}

/// Parse a lowercase enum label through its `FromStr` impl.
pub(crate) fn label_at<T>(row: &Row<'_>, idx: usize) -> rusqlite::Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    let raw: String = row.get(idx)?;
    raw.parse::<T>().map_err(|e| conversion_error(idx, Type::Text, e.to_string()))
}

/// Map JoinError from spawn_blocking to SchedulrError.
pub(crate) fn map_join_error(err: task::JoinError) -> SchedulrError {
    if err.is_cancelled() {
        SchedulrError::Internal("blocking task cancelled".into())
    } else {
        SchedulrError::Internal(format!("blocking task failed: {err}"))
    }
}
