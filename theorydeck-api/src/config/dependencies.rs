//! Dependency initialization and wiring for the API server.
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use theorydeck_repository::{MemoryStore, PostgresStore, Store};
use tracing::{info, warn};

use crate::config::{Config, StoreBackend};
use crate::errors::StartupError;
use crate::server::state::AppState;

/// Container for all initialized dependencies.
pub struct Dependencies {
    pub state: AppState,
}

impl Dependencies {
    /// Connects the configured store and builds the services on top of it.
    ///
    /// For the PostgreSQL backend, pending migrations are applied before the
    /// server accepts requests. When `ADMIN_EMAIL` is set, an administrator
    /// is bootstrapped if none exists yet.
    ///
    /// # Returns
    ///
    /// * `Ok(Dependencies)` - Ready-to-serve application state
    /// * `Err(StartupError)` - Missing configuration, unreachable database or
    ///   failed migration
    pub async fn new(config: &Config) -> Result<Self, StartupError> {
        let store: Arc<dyn Store> = match config.store_backend {
            StoreBackend::Postgres => {
                let database_url = config
                    .database_url
                    .as_deref()
                    .ok_or_else(|| StartupError::config("DATABASE_URL must be set for the postgres backend"))?;

                let pool = PgPoolOptions::new()
                    .max_connections(config.database_max_connections)
                    .connect(database_url)
                    .await?;
                let store = PostgresStore::new(pool).await?;
                store.migrate().await?;
                info!(max_connections = config.database_max_connections, "PostgreSQL store ready");
                Arc::new(store)
            }
            StoreBackend::Memory => {
                warn!("Using the in-memory store; data is lost on shutdown");
                Arc::new(MemoryStore::new())
            }
        };

        let state = AppState::new(store, config.allow_self_vote);
        if let Some(email) = &config.admin_email {
            state.users.ensure_admin(email).await?;
        }

        Ok(Self { state })
    }
}
