//! Error types for domain value parsing.
use thiserror::Error;

/// Errors raised when raw values cannot be turned into domain types.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Invalid vote strength: {0}. Must be 0, 2, 5, 8, or 10")]
    InvalidVoteStrength(i64),

    #[error("Unknown {kind}: {value}")]
    UnknownVariant { kind: &'static str, value: String },
}

impl DomainError {
    /// Create an unknown variant error.
    pub fn unknown(kind: &'static str, value: impl Into<String>) -> Self {
        Self::UnknownVariant {
            kind,
            value: value.into(),
        }
    }
}
