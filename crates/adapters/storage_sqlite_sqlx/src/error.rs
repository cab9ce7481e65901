//! Storage-specific error type wrapping sqlx errors.

use dbc_domain::error::DbcError;

/// Errors originating from the `SQLite` storage layer.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// A query, transaction or connection failed.
    #[error("database error")]
    Database(#[from] sqlx::Error),

    /// Failed to run migrations.
    #[error("migration error")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

impl From<StorageError> for DbcError {
    fn from(err: StorageError) -> Self {
        Self::Storage(Box::new(err))
    }
}
