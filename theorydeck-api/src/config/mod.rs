//! Runtime configuration read from the environment.
//!
//! Every setting has a default; values that fail to parse fall back to it
//! with a warning instead of aborting start-up. Only `DATABASE_URL` is
//! mandatory, and only for the PostgreSQL backend (checked when wiring
//! dependencies).
pub mod dependencies;

use axum::http::{header, HeaderName, HeaderValue, Method};
use std::env;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use tower_http::cors::CorsLayer;
use tracing::warn;

use crate::server::auth::USER_ID_HEADER;

/// Default bind address.
const DEFAULT_SERVER_HOST: IpAddr = IpAddr::V4(Ipv4Addr::LOCALHOST);

/// Default bind port.
const DEFAULT_SERVER_PORT: u16 = 8080;

/// Default size of the PostgreSQL pool.
const DEFAULT_MAX_CONNECTIONS: u32 = 10;

/// Frontends allowed by default (Next.js and Vite dev servers).
const DEFAULT_CORS_ORIGINS: [&str; 4] = [
    "http://localhost:3000",
    "http://localhost:5173",
    "http://127.0.0.1:3000",
    "http://127.0.0.1:5173",
];

/// Where entities are persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Postgres,
    /// Volatile in-process store, for local runs and demos.
    Memory,
}

impl StoreBackend {
    fn from_env() -> Self {
        match env::var("STORE_BACKEND")
            .unwrap_or_else(|_| "postgres".to_string())
            .to_lowercase()
            .as_str()
        {
            "postgres" | "postgresql" => Self::Postgres,
            "memory" | "in-memory" => Self::Memory,
            other => {
                warn!(value = %other, "Invalid STORE_BACKEND, defaulting to 'postgres'");
                Self::Postgres
            }
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_addr: SocketAddr,
    pub store_backend: StoreBackend,
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub cors_allowed_origins: Vec<String>,
    pub allow_self_vote: bool,
    /// Account promoted to administrator on start-up when no admin exists.
    pub admin_email: Option<String>,
}

/// Reads `key` and parses it, warning and falling back to `default` when the
/// value is present but invalid.
fn parse_env<T>(key: &str, default: T) -> T
where
    T: FromStr + std::fmt::Display,
{
    match env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %raw, default = %default, "Invalid value, using default");
            default
        }),
        Err(_) => default,
    }
}

fn parse_flag(key: &str) -> bool {
    match env::var(key) {
        Ok(raw) => match raw.trim().to_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => true,
            "0" | "false" | "no" | "off" | "" => false,
            _ => {
                warn!(key, value = %raw, "Invalid boolean, defaulting to false");
                false
            }
        },
        Err(_) => false,
    }
}

impl Config {
    /// Builds the configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `SERVER_HOST`: Bind address (default: 127.0.0.1)
    /// - `SERVER_PORT`: Bind port (default: 8080)
    /// - `STORE_BACKEND`: "postgres" or "memory" (default: postgres)
    /// - `DATABASE_URL`: PostgreSQL connection string
    /// - `DATABASE_MAX_CONNECTIONS`: Pool size (default: 10)
    /// - `CORS_ALLOWED_ORIGINS`: Comma-separated origins (default: local dev servers)
    /// - `ALLOW_SELF_VOTE`: Let authors vote on their own evidence (default: false)
    /// - `ADMIN_EMAIL`: Bootstrap administrator account
    pub fn from_env() -> Self {
        let host = parse_env("SERVER_HOST", DEFAULT_SERVER_HOST);
        let port = parse_env("SERVER_PORT", DEFAULT_SERVER_PORT);

        let cors_allowed_origins = env::var("CORS_ALLOWED_ORIGINS")
            .ok()
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|o| !o.is_empty())
                    .map(String::from)
                    .collect::<Vec<_>>()
            })
            .filter(|origins| !origins.is_empty())
            .unwrap_or_else(|| DEFAULT_CORS_ORIGINS.iter().map(|o| o.to_string()).collect());

        Self {
            server_addr: SocketAddr::new(host, port),
            store_backend: StoreBackend::from_env(),
            database_url: env::var("DATABASE_URL").ok().filter(|url| !url.trim().is_empty()),
            database_max_connections: parse_env("DATABASE_MAX_CONNECTIONS", DEFAULT_MAX_CONNECTIONS),
            cors_allowed_origins,
            allow_self_vote: parse_flag("ALLOW_SELF_VOTE"),
            admin_email: env::var("ADMIN_EMAIL").ok().filter(|e| !e.trim().is_empty()),
        }
    }

    /// Create the CORS layer for the configured frontends.
    pub fn cors_layer(&self) -> CorsLayer {
        let origins: Vec<HeaderValue> = self
            .cors_allowed_origins
            .iter()
            .filter_map(|origin| match origin.parse::<HeaderValue>() {
                Ok(value) => Some(value),
                Err(_) => {
                    warn!(origin = %origin, "Skipping invalid CORS origin");
                    None
                }
            })
            .collect();

        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods([
                Method::GET,
                Method::POST,
                Method::PATCH,
                Method::DELETE,
                Method::OPTIONS,
            ])
            .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(USER_ID_HEADER)])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const KEYS: [&str; 8] = [
        "SERVER_HOST",
        "SERVER_PORT",
        "STORE_BACKEND",
        "DATABASE_URL",
        "DATABASE_MAX_CONNECTIONS",
        "CORS_ALLOWED_ORIGINS",
        "ALLOW_SELF_VOTE",
        "ADMIN_EMAIL",
    ];

    fn clear_env_vars() {
        for key in KEYS {
            env::remove_var(key);
        }
    }

    #[test]
    #[serial]
    fn test_defaults_when_unset() {
        clear_env_vars();
        let config = Config::from_env();

        assert_eq!(config.server_addr, "127.0.0.1:8080".parse().unwrap());
        assert_eq!(config.store_backend, StoreBackend::Postgres);
        assert_eq!(config.database_url, None);
        assert_eq!(config.database_max_connections, 10);
        assert_eq!(config.cors_allowed_origins.len(), 4);
        assert!(!config.allow_self_vote);
        assert_eq!(config.admin_email, None);
    }

    #[test]
    #[serial]
    fn test_reads_overrides() {
        clear_env_vars();
        env::set_var("SERVER_HOST", "0.0.0.0");
        env::set_var("SERVER_PORT", "9000");
        env::set_var("STORE_BACKEND", "Memory");
        env::set_var("DATABASE_MAX_CONNECTIONS", "25");
        env::set_var("CORS_ALLOWED_ORIGINS", "https://theorydeck.app, https://admin.theorydeck.app,");
        env::set_var("ALLOW_SELF_VOTE", "true");
        env::set_var("ADMIN_EMAIL", "root@theorydeck.app");

        let config = Config::from_env();
        clear_env_vars();

        assert_eq!(config.server_addr, "0.0.0.0:9000".parse().unwrap());
        assert_eq!(config.store_backend, StoreBackend::Memory);
        assert_eq!(config.database_max_connections, 25);
        assert_eq!(
            config.cors_allowed_origins,
            vec!["https://theorydeck.app", "https://admin.theorydeck.app"]
        );
        assert!(config.allow_self_vote);
        assert_eq!(config.admin_email.as_deref(), Some("root@theorydeck.app"));
    }

    #[test]
    #[serial]
    fn test_invalid_values_fall_back_to_defaults() {
        clear_env_vars();
        env::set_var("SERVER_PORT", "not-a-port");
        env::set_var("SERVER_HOST", "localhost:80");
        env::set_var("STORE_BACKEND", "mongodb");
        env::set_var("DATABASE_MAX_CONNECTIONS", "-3");
        env::set_var("ALLOW_SELF_VOTE", "perhaps");

        let config = Config::from_env();
        clear_env_vars();

        assert_eq!(config.server_addr, "127.0.0.1:8080".parse().unwrap());
        assert_eq!(config.store_backend, StoreBackend::Postgres);
        assert_eq!(config.database_max_connections, 10);
        assert!(!config.allow_self_vote);
    }
}
