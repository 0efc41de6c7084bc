//! Startup configuration, read once from the process environment.
//!
//! - DATABASE_URL: Postgres connection string; selects the database store
//! - SEED_FILE: JSON seed file for the in-memory store (default: recipes.json)
//! - BIND_ADDR: listen address (default: 0.0.0.0:3000)

use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
pub const DEFAULT_SEED_FILE: &str = "recipes.json";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid BIND_ADDR {value:?}: {source}")]
    InvalidBindAddr {
        value: String,
        source: std::net::AddrParseError,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// When set, recipes live in Postgres instead of memory
    pub database_url: Option<String>,
    pub seed_file: PathBuf,
    pub bind_addr: SocketAddr,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a config from any key lookup. Empty values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let bind_value = get("BIND_ADDR").unwrap_or_else(|| DEFAULT_BIND_ADDR.to_string());
        let bind_addr = bind_value
            .parse()
            .map_err(|source| ConfigError::InvalidBindAddr {
                value: bind_value.clone(),
                source,
            })?;

        Ok(Self {
            database_url: get("DATABASE_URL"),
            seed_file: PathBuf::from(
                get("SEED_FILE").unwrap_or_else(|| DEFAULT_SEED_FILE.to_string()),
            ),
            bind_addr,
        })
    }
}
