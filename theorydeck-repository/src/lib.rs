//! # TheoryDeck Repository
//! This crate provides traits and implementations for interacting with the
//! TheoryDeck data store. It includes definitions for errors, interfaces,
//! and concrete implementations for PostgreSQL and for an in-process memory
//! store used by tests and local runs.
pub mod errors;
pub mod interfaces;
pub mod memory;
pub mod postgres;

pub use errors::RepositoryError;
pub use interfaces::{
    EvidenceRepository, ReportRepository, Store, TheoryRepository, UserRepository, VoteRepository,
};
pub use memory::MemoryStore;
pub use postgres::PostgresStore;
