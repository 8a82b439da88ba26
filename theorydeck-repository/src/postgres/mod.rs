//! PostgreSQL implementation of the TheoryDeck repository.
//!
//! Provides a production-ready PostgreSQL backend for every repository trait
//! with connection pooling, embedded migrations and atomic upserts.
//!
//! ## Key Features
//!
//! - Connection pooling with `sqlx::PgPool`
//! - Schema shipped as SQLx migrations and applied with [`PostgresStore::migrate`]
//! - Vote upserts with `ON CONFLICT (user_id, card_id) DO UPDATE`
//! - Dynamic listing filters built with `QueryBuilder`
//!
//! ## Database Tables
//!
//! - `users`: Accounts and their role
//! - `theories`: Claims and their lifecycle status
//! - `evidence_cards`: FOR/AGAINST evidence, soft-deleted through `status`
//! - `votes`: One strength rating per user and card
//! - `reports`: Moderation queue
mod evidence;
mod reports;
mod rows;
mod theories;
mod users;
mod votes;

use crate::errors::RepositoryError;

/// PostgreSQL implementation of the TheoryDeck repository.
///
/// Implements all repository traits over a single connection pool, so one
/// instance can be shared as an `Arc<dyn Store>`.
#[derive(Clone)]
pub struct PostgresStore {
    pool: sqlx::PgPool,
}

impl PostgresStore {
    /// Creates a new PostgreSQL store instance.
    ///
    /// # Arguments
    ///
    /// * `pool` - Configured PostgreSQL connection pool
    ///
    /// # Returns
    ///
    /// * `Ok(PostgresStore)` - Ready-to-use store instance
    /// * `Err(RepositoryError)` - Future validation errors (currently always succeeds)
    pub async fn new(pool: sqlx::PgPool) -> Result<Self, RepositoryError> {
        Ok(Self { pool })
    }

    /// Applies any pending schema migrations.
    pub async fn migrate(&self) -> Result<(), RepositoryError> {
        sqlx::migrate!("src/postgres/migrations").run(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &sqlx::PgPool {
        &self.pool
    }
}

/// Maps unique constraint violations onto `RepositoryError::Conflict`.
fn map_unique_violation(err: sqlx::Error, what: &str) -> RepositoryError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.is_unique_violation() {
            return RepositoryError::conflict(format!("{what} already exists"));
        }
    }
    RepositoryError::DatabaseError(err)
}
