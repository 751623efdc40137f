//! Classification of pool and Diesel failures into store errors.
//!
//! Driver text is logged at `debug` and never copied into the returned error.
//! PostgreSQL reports deadlocks and statement timeouts with SQLSTATEs Diesel
//! does not model, so those are recognised by the server's message prefix.

use diesel::result::{DatabaseErrorKind, Error as DieselError};
use tracing::debug;

use super::pool::PoolError;
use crate::domain::ports::AssociationStoreError;

const DEADLOCK_PREFIX: &str = "deadlock detected";
const STATEMENT_TIMEOUT_PREFIX: &str = "canceling statement due to statement timeout";
const LOCK_TIMEOUT_PREFIX: &str = "canceling statement due to lock timeout";

/// Map pool failures. Every pool failure is a connectivity problem.
pub(crate) fn map_pool_error(error: PoolError) -> AssociationStoreError {
    debug!(error = %error, "connection pool checkout failed");
    match error {
        PoolError::Checkout { .. } => {
            AssociationStoreError::connection("timed out waiting for a database connection")
        }
        PoolError::Build { .. } => AssociationStoreError::connection("database pool unavailable"),
        PoolError::Closed => AssociationStoreError::connection("database pool is closed"),
    }
}

/// Map Diesel failures, naming the entity in messages callers may see.
pub(crate) fn map_diesel_error(error: DieselError, entity: &str) -> AssociationStoreError {
    match &error {
        DieselError::DatabaseError(kind, info) => debug!(
            ?kind,
            message = info.message(),
            constraint = info.constraint_name(),
            "diesel operation failed"
        ),
        _ => debug!(error = %error, "diesel operation failed"),
    }

    match error {
        DieselError::DatabaseError(kind, info) => classify_database_error(&kind, info.message(), entity),
        DieselError::NotFound => AssociationStoreError::query(format!("{entity} row missing")),
        DieselError::QueryBuilderError(_) => AssociationStoreError::query("database query error"),
        _ => AssociationStoreError::query("database error"),
    }
}

fn classify_database_error(
    kind: &DatabaseErrorKind,
    message: &str,
    entity: &str,
) -> AssociationStoreError {
    match kind {
        DatabaseErrorKind::UniqueViolation => {
            AssociationStoreError::conflict(format!("{entity} already exists"))
        }
        DatabaseErrorKind::ForeignKeyViolation => {
            AssociationStoreError::not_found("referenced user does not exist")
        }
        DatabaseErrorKind::CheckViolation | DatabaseErrorKind::NotNullViolation => {
            AssociationStoreError::validation(format!("{entity} violates a storage constraint"))
        }
        DatabaseErrorKind::SerializationFailure => {
            AssociationStoreError::connection("transaction aborted by a concurrent update")
        }
        DatabaseErrorKind::ClosedConnection | DatabaseErrorKind::UnableToSendCommand => {
            AssociationStoreError::connection("database connection lost")
        }
        _ if message.starts_with(DEADLOCK_PREFIX) => {
            AssociationStoreError::connection("transaction aborted by a deadlock")
        }
        _ if message.starts_with(STATEMENT_TIMEOUT_PREFIX)
            || message.starts_with(LOCK_TIMEOUT_PREFIX) =>
        {
            AssociationStoreError::timeout("database statement timed out")
        }
        _ => AssociationStoreError::query("database error"),
    }
}
