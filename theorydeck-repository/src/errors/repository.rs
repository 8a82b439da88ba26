//! Error types for the repository.
//! Defines specific errors that can occur during database operations.
use theorydeck_shared::DomainError;
use thiserror::Error;

/// Represents errors that can occur within the repository.
///
/// This enum consolidates the failure modes of every backend: SQLx errors,
/// failed migrations, unique constraint violations and stored values that
/// no longer map onto a domain type.
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),

    #[error("Invalid stored value: {0}")]
    InvalidValue(#[from] DomainError),

    #[error("Conflict: {0}")]
    Conflict(String),
}

impl RepositoryError {
    /// Create a conflict error.
    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }
}
