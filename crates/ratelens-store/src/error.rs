//! Store error types.

use ratelens_types::RatelensError;
use thiserror::Error;

/// Errors raised by a rate store.
#[derive(Error, Debug)]
pub enum StoreError {
    /// The connection pool could not be built or yielded no connection.
    #[error("Connection pool error: {0}")]
    Pool(String),

    /// The blocking database task failed.
    #[error("Database interaction error: {0}")]
    Interact(String),

    /// A query failed; the transaction was rolled back.
    #[error("Database error: {0}")]
    Query(#[from] diesel::result::Error),

    /// Pending migrations could not be applied.
    #[error("Migration failed: {0}")]
    Migration(String),

    /// A value could not be converted to its column type.
    #[error("Cannot store {value} for {subject}: {reason}")]
    Conversion {
        /// Series id or source the value belongs to.
        subject: String,
        /// Offending value.
        value: f64,
        /// What went wrong.
        reason: &'static str,
    },
}

impl From<deadpool_diesel::PoolError> for StoreError {
    fn from(e: deadpool_diesel::PoolError) -> Self {
        Self::Pool(e.to_string())
    }
}

impl From<deadpool_diesel::InteractError> for StoreError {
    fn from(e: deadpool_diesel::InteractError) -> Self {
        Self::Interact(format!("{e:?}"))
    }
}

impl From<StoreError> for RatelensError {
    fn from(e: StoreError) -> Self {
        Self::Persistence(e.to_string())
    }
}

/// Result alias for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_into_persistence_error() {
        let err: RatelensError = StoreError::Migration("relation exists".into()).into();
        assert_eq!(
            err.to_string(),
            "Persistence error: Migration failed: relation exists"
        );
    }
}
