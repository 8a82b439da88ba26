//! # TheoryDeck Shared
//! This crate defines the domain types shared across the TheoryDeck workspace.
//! It includes theories, evidence cards, votes, reports, users and their
//! status enums, together with the role predicates, slug generation and form
//! validation that every layer relies on.
pub mod errors;
pub mod permissions;
pub mod slug;
pub mod types;
pub mod validation;

pub use errors::DomainError;
pub use validation::ValidationErrors;
