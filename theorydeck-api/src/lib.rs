//! TheoryDeck HTTP API
//!
//! Axum server exposing theories, evidence cards, strength voting and
//! moderation reports on top of the service layer.

pub mod config;
pub mod errors;
pub mod server;

pub use config::dependencies::Dependencies;
pub use config::{Config, StoreBackend};
pub use errors::{ApiError, StartupError};
pub use server::state::AppState;
pub use server::{create_app, run_server};
