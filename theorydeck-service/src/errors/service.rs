//! Error type shared by every TheoryDeck service.
use theorydeck_repository::RepositoryError;
use theorydeck_shared::{DomainError, ValidationErrors};
use thiserror::Error;

/// Represents the ways a service operation can fail.
///
/// The variants map one-to-one onto the HTTP statuses the API returns, so the
/// API layer never has to inspect messages.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Validation failed")]
    Validation(ValidationErrors),
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("{0}")]
    Conflict(String),
    #[error("Repository error: {0}")]
    Repository(RepositoryError),
}

impl ServiceError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        ServiceError::BadRequest(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        ServiceError::Forbidden(msg.into())
    }
}

impl From<RepositoryError> for ServiceError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Conflict(msg) => ServiceError::Conflict(msg),
            other => ServiceError::Repository(other),
        }
    }
}

impl From<ValidationErrors> for ServiceError {
    fn from(errors: ValidationErrors) -> Self {
        ServiceError::Validation(errors)
    }
}

impl From<DomainError> for ServiceError {
    fn from(err: DomainError) -> Self {
        ServiceError::BadRequest(err.to_string())
    }
}
