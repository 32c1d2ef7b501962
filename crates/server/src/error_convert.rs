use shared_types::AppError;

use crate::repo::StoreError;

/// PostgreSQL SQLSTATE for a unique constraint violation.
const UNIQUE_VIOLATION: &str = "23505";

/// Convert a sqlx::Error into a StoreError.
pub fn sqlx_to_store_error(err: sqlx::Error) -> StoreError {
    match &err {
        sqlx::Error::RowNotFound => StoreError::NotFound,
        sqlx::Error::Database(db_err) if db_err.code().as_deref() == Some(UNIQUE_VIOLATION) => {
            StoreError::DuplicateKey(db_err.message().to_string())
        }
        _ => StoreError::Unavailable(err.to_string()),
    }
}

/// Extension trait providing `.into_store_error()` on sqlx::Error.
pub trait SqlxErrorExt {
    fn into_store_error(self) -> StoreError;
}

impl SqlxErrorExt for sqlx::Error {
    fn into_store_error(self) -> StoreError {
        sqlx_to_store_error(self)
    }
}

/// A duplicate key from the store is the same client-facing outcome as a
/// failed title pre-check.
impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound => AppError::not_found("Todo not found"),
            StoreError::DuplicateKey(detail) => {
                tracing::debug!(%detail, "unique title index rejected write");
                AppError::duplicate_title()
            }
            StoreError::Unavailable(detail) => {
                tracing::error!(error = %detail, "storage operation failed");
                AppError::database("Database operation failed")
            }
        }
    }
}
