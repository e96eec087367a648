//! Service configuration read from environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `HOST` | `0.0.0.0` |
//! | `PORT` | `8001` |
//! | `STORAGE_MODE` | `in_memory` (`in_memory` or `postgres`) |
//! | `DATABASE_URL` | required when `STORAGE_MODE=postgres` |
//! | `DATABASE_POOL_SIZE` | `10` |
//! | `OPERATION_TIMEOUT_SECS` | `100` |

use crate::task::services::DEFAULT_OPERATION_TIMEOUT;
use std::env;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8001;
const DEFAULT_POOL_SIZE: u32 = 10;

/// Backend holding task documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StorageMode {
    /// Process-local store; contents are lost on exit.
    #[default]
    InMemory,
    /// `PostgreSQL` store reached through `DATABASE_URL`.
    Postgres,
}

impl FromStr for StorageMode {
    type Err = ConfigurationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "in_memory" | "memory" => Ok(Self::InMemory),
            "postgres" | "postgresql" => Ok(Self::Postgres),
            _ => Err(ConfigurationError::InvalidStorageMode(value.to_owned())),
        }
    }
}

/// Errors raised while reading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigurationError {
    /// `STORAGE_MODE` holds an unknown value.
    #[error("invalid STORAGE_MODE '{0}', expected in_memory or postgres")]
    InvalidStorageMode(String),

    /// `DATABASE_URL` is missing while `STORAGE_MODE=postgres`.
    #[error("DATABASE_URL is required when STORAGE_MODE=postgres")]
    MissingDatabaseUrl,

    /// A numeric variable could not be parsed or is zero.
    #[error("invalid {variable} '{value}', expected a positive integer")]
    InvalidNumber {
        /// Variable name.
        variable: &'static str,
        /// Offending value.
        value: String,
    },

    /// `HOST` is not an IPv4 or IPv6 address.
    #[error("invalid HOST '{0}', expected an IP address")]
    InvalidListenAddress(String),
}

/// Runtime configuration of the service binary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    /// Address the HTTP server binds.
    pub listen_addr: SocketAddr,
    /// Selected storage backend.
    pub storage_mode: StorageMode,
    /// `PostgreSQL` connection URL.
    pub database_url: Option<String>,
    /// Maximum pooled `PostgreSQL` connections.
    pub database_pool_size: u32,
    /// Bound applied to every store operation.
    pub operation_timeout: Duration,
}

impl ServiceConfig {
    /// Reads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError`] when a variable holds an invalid value
    /// or `DATABASE_URL` is missing for the `PostgreSQL` backend.
    pub fn from_env() -> Result<Self, ConfigurationError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Reads configuration through an arbitrary variable lookup.
    ///
    /// Empty or whitespace-only values count as unset.
    ///
    /// # Errors
    ///
    /// See [`ServiceConfig::from_env`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigurationError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };

        let host = read("HOST").unwrap_or_else(|| DEFAULT_HOST.to_owned());
        let port = read("PORT").map_or(Ok(DEFAULT_PORT), |value| {
            value
                .parse::<u16>()
                .map_err(|_| ConfigurationError::InvalidNumber {
                    variable: "PORT",
                    value,
                })
        })?;
        let ip = host
            .trim_start_matches('[')
            .trim_end_matches(']')
            .parse::<IpAddr>()
            .map_err(|_| ConfigurationError::InvalidListenAddress(host.clone()))?;
        let listen_addr = SocketAddr::new(ip, port);

        let storage_mode = read("STORAGE_MODE")
            .map_or(Ok(StorageMode::default()), |value| value.parse())?;
        let database_pool_size = parse_positive(
            "DATABASE_POOL_SIZE",
            read("DATABASE_POOL_SIZE"),
            DEFAULT_POOL_SIZE,
        )?;
        let timeout_secs = parse_positive(
            "OPERATION_TIMEOUT_SECS",
            read("OPERATION_TIMEOUT_SECS"),
            DEFAULT_OPERATION_TIMEOUT.as_secs(),
        )?;

        let config = Self {
            listen_addr,
            storage_mode,
            database_url: read("DATABASE_URL"),
            database_pool_size,
            operation_timeout: Duration::from_secs(timeout_secs),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates cross-field requirements.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigurationError::MissingDatabaseUrl`] when the
    /// `PostgreSQL` backend is selected without a URL.
    pub const fn validate(&self) -> Result<(), ConfigurationError> {
        if matches!(self.storage_mode, StorageMode::Postgres) && self.database_url.is_none() {
            return Err(ConfigurationError::MissingDatabaseUrl);
        }
        Ok(())
    }
}

fn parse_positive<T>(
    variable: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigurationError>
where
    T: FromStr + PartialOrd + Default,
{
    let Some(raw) = value else {
        return Ok(default);
    };
    match raw.parse::<T>() {
        Ok(parsed) if parsed > T::default() => Ok(parsed),
        _ => Err(ConfigurationError::InvalidNumber {
            variable,
            value: raw,
        }),
    }
}
