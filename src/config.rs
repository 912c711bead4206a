//! Configuration management for the contact manager.
//!
//! Configuration comes from environment variables, optionally seeded from a
//! `.env` file in the working directory.

use crate::error::{ConfigError, ConfigResult};
use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:3000";

/// Configuration for the contact manager service.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address the HTTP server listens on
    pub bind_addr: SocketAddr,

    /// Snapshot file for the document store; in-memory only when unset
    pub data_file: Option<PathBuf>,

    /// Log level used when `RUST_LOG` is not set (default: "info")
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Optional environment variables:
    /// - `CONTACTS_BIND_ADDR`: listen address (default: 127.0.0.1:3000)
    /// - `CONTACTS_DATA_FILE`: path of the store snapshot file
    /// - `LOG_LEVEL`: logging level (default: "info")
    pub fn from_env() -> ConfigResult<Self> {
        // A missing .env file is fine.
        let _ = dotenvy::dotenv();

        let bind_addr = match env::var("CONTACTS_BIND_ADDR") {
            Ok(val) => Self::parse_bind_addr("CONTACTS_BIND_ADDR", &val)?,
            Err(_) => Self::parse_bind_addr("CONTACTS_BIND_ADDR", DEFAULT_BIND_ADDR)?,
        };

        let data_file = match env::var("CONTACTS_DATA_FILE") {
            Ok(val) if val.trim().is_empty() => {
                return Err(ConfigError::InvalidValue {
                    var: "CONTACTS_DATA_FILE".to_string(),
                    reason: "Cannot be empty".to_string(),
                })
            }
            Ok(val) => Some(PathBuf::from(val)),
            Err(_) => None,
        };

        let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Config {
            bind_addr,
            data_file,
            log_level,
        })
    }

    fn parse_bind_addr(var_name: &str, value: &str) -> ConfigResult<SocketAddr> {
        value
            .trim()
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidValue {
                var: var_name.to_string(),
                reason: format!("Must be a socket address like 127.0.0.1:3000, got: {}", value),
            })
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 3000)),
            data_file: None,
            log_level: "info".to_string(),
        }
    }
}
