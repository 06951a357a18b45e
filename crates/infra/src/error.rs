//! Storage error model.
//!
//! ## Error Mapping
//!
//! SQLx errors are mapped to `StoreError` as follows:
//!
//! | SQLx Error | PostgreSQL Error Code | StoreError | Scenario |
//! |------------|----------------------|------------|----------|
//! | RowNotFound | N/A | `NotFound` | Lookup for a row that does not exist (or sits outside the caller's scope) |
//! | Database (unique violation) | `23505` | `Conflict` | Duplicate messenger id / email on insert |
//! | Database (other) | Any other | `Backend` | Other database errors |
//! | Other | N/A | `Backend` | Network errors, pool failures, etc. |

use thiserror::Error;

use staffhub_auth::AuthError;
use staffhub_core::DomainError;

/// Result type used across the storage layer.
pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The row does not exist *or* sits outside the caller's scope. The two
    /// cases are deliberately indistinguishable.
    #[error("not found")]
    NotFound,

    /// An authorization policy evaluated inside the store said no
    /// (role assignment checks run under the store's own transaction).
    #[error(transparent)]
    Denied(#[from] AuthError),

    /// A record-level validation failed while mutating a row in place.
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// A uniqueness conflict (duplicate messenger id, email, ...).
    #[error("conflict: {0}")]
    Conflict(String),

    /// The backend itself failed. Opaque to callers.
    #[error("storage failure in {operation}: {message}")]
    Backend { operation: String, message: String },
}

impl StoreError {
    pub fn backend(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Backend {
            operation: operation.into(),
            message: message.into(),
        }
    }
}

pub(crate) fn map_sqlx_error(operation: &str, err: sqlx::Error) -> StoreError {
    match err {
        sqlx::Error::RowNotFound => StoreError::NotFound,
        sqlx::Error::Database(db_err) => {
            let message = db_err.message().to_owned();
            if db_err.code().as_deref() == Some("23505") {
                StoreError::Conflict(message)
            } else {
                StoreError::backend(operation, message)
            }
        }
        sqlx::Error::PoolClosed => StoreError::backend(operation, "connection pool closed"),
        other => StoreError::backend(operation, other.to_string()),
    }
}
