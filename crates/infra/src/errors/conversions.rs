//! Conversions from external infrastructure errors into domain errors.

use r2d2::Error as PoolError;
use rusqlite::Error as SqlError;
use schedulr_domain::SchedulrError;

/// Error newtype that keeps conversions on the infrastructure side and can be
/// converted back into the domain error.
#[derive(Debug)]
pub struct InfraError(pub SchedulrError);

impl From<InfraError> for SchedulrError {
    fn from(value: InfraError) -> Self {
        value.0
    }
}

impl From<SchedulrError> for InfraError {
    fn from(value: SchedulrError) -> Self {
        Self(value)
    }
}

trait IntoSchedulrError {
    fn into_schedulr(self) -> SchedulrError;
}

/* -------------------------------------------------------------------------- */
/* rusqlite::Error → SchedulrError */
/* -------------------------------------------------------------------------- */

impl IntoSchedulrError for SqlError {
    fn into_schedulr(self) -> SchedulrError {
        use rusqlite::ffi::ErrorCode;
        use rusqlite::Error as RE;

        match self {
            RE::SqliteFailure(err, maybe_message) => {
                let message = maybe_message.unwrap_or_default();
                match (err.code, err.extended_code) {
                    (ErrorCode::DatabaseBusy, _) => {
                        SchedulrError::Database("database is busy".into())
                    }
                    (ErrorCode::DatabaseLocked, _) => {
                        SchedulrError::Database("database is locked".into())
                    }
                    (ErrorCode::ConstraintViolation, 2067) => {
                        SchedulrError::Database(format!("unique constraint violation: {message}"))
                    }
                    (ErrorCode::ConstraintViolation, 787) => {
                        SchedulrError::Database("foreign key constraint violation".into())
                    }
                    _ => SchedulrError::Database(format!(
                        "sqlite failure {:?} (code {}): {}",
                        err.code, err.extended_code, message
                    )),
                }
            }
            RE::QueryReturnedNoRows => SchedulrError::NotFound("no rows returned by query".into()),
            RE::FromSqlConversionFailure(_, _, cause) => {
                SchedulrError::Database(format!("failed to convert sqlite value: {cause}"))
            }
            RE::InvalidColumnType(_, _, ty) => {
                SchedulrError::Database(format!("invalid column type: {ty}"))
            }
            RE::InvalidPath(path) => SchedulrError::Database(format!(
                "invalid database path: {}",
                path.to_string_lossy()
            )),
            RE::InvalidQuery => SchedulrError::Database("invalid SQL query".into()),
            other => SchedulrError::Database(other.to_string()),
        }
    }
}

impl From<SqlError> for InfraError {
    fn from(value: SqlError) -> Self {
        Self(value.into_schedulr())
    }
}

/* -------------------------------------------------------------------------- */
/* r2d2::Error → SchedulrError */
/* -------------------------------------------------------------------------- */

impl IntoSchedulrError for PoolError {
    fn into_schedulr(self) -> SchedulrError {
        SchedulrError::Database(format!("connection pool: {self}"))
    }
}

impl From<PoolError> for InfraError {
    fn from(value: PoolError) -> Self {
        Self(value.into_schedulr())
    }
}

/// Whether `err` is a UNIQUE constraint failure
pub(crate) fn is_unique_violation(err: &SqlError) -> bool {
    matches!(
        err,
        SqlError::SqliteFailure(ffi, _)
            if ffi.code == rusqlite::ffi::ErrorCode::ConstraintViolation && ffi.extended_code == 2067
    )
}

/* -------------------------------------------------------------------------- */
/* Tests */
/* -------------------------------------------------------------------------- */
