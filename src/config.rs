//! Validation limits, server defaults and environment-driven configuration.

use std::env;

use crate::error::{RegistryError, Result};
use crate::ranking::RankingStrategy;

/// Youngest accepted candidate age.
pub const MIN_AGE: u8 = 18;

/// Oldest accepted candidate age.
pub const MAX_AGE: u8 = 100;

/// Exact number of digits in a phone number.
pub const PHONE_DIGITS: usize = 10;

pub const DEFAULT_DB_PATH: &str = "candidates.db";
pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8000;

/// Runtime configuration for the server and CLI front-ends
#[derive(Debug, Clone, PartialEq)]
pub struct ServiceConfig {
    /// SQLite database path (`:memory:` for an ephemeral store)
    pub db_path: String,
    pub host: String,
    pub port: u16,
    pub ranker: RankingStrategy,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            db_path: DEFAULT_DB_PATH.to_string(),
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            ranker: RankingStrategy::default(),
        }
    }
}

impl ServiceConfig {
    /// Read `DB_PATH`, `HOST`, `PORT` and `RANKER`, falling back to defaults
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|_| RegistryError::Config(format!("PORT must be a port number, got '{}'", raw)))?,
            None => defaults.port,
        };

        let ranker = match lookup("RANKER") {
            Some(raw) => raw.parse()?,
            None => defaults.ranker,
        };

        Ok(Self {
            db_path: lookup("DB_PATH").unwrap_or(defaults.db_path),
            host: lookup("HOST").unwrap_or(defaults.host),
            port,
            ranker,
        })
    }

    /// `host:port` listen address
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
