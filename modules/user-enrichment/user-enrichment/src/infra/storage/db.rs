//! Database error classification helpers.

use std::future::Future;
use std::time::Duration;

use sea_orm::{DbErr, SqlErr};

use crate::domain::error::DomainError;

/// Classify a storage failure. The engine error is kept only as the source.
#[must_use]
pub fn db_err(op: &'static str, e: DbErr) -> DomainError {
    let sql_err = e.sql_err();
    classify(op, sql_err, e)
}

fn classify(op: &'static str, sql_err: Option<SqlErr>, e: DbErr) -> DomainError {
    match sql_err {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            tracing::warn!(op, %detail, "Unique constraint violated");
            DomainError::already_exists("user already exists").with_source(e)
        }
        Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
            tracing::warn!(op, %detail, "Foreign key constraint violated");
            DomainError::not_found("referenced record not found").with_source(e)
        }
        _ => {
            tracing::error!(op, error = %e, "Storage operation failed");
            DomainError::internal(format!("{op} failed")).with_source(e)
        }
    }
}

/// Run a storage future under `timeout`; expiry is an internal error.
pub async fn bounded<T, F>(timeout: Duration, op: &'static str, fut: F) -> Result<T, DomainError>
where
    F: Future<Output = Result<T, DbErr>>,
{
    match tokio::time::timeout(timeout, fut).await {
        Ok(res) => res.map_err(|e| db_err(op, e)),
        Err(_) => {
            tracing::error!(op, ?timeout, "Storage operation timed out");
            Err(DomainError::internal(format!("{op} timed out")))
        }
    }
}
