//! Store configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All optional:
//! - `CART_SYNC_POLICY` - `observed` or `rollback` (default: observed)
//! - `CART_TABLE_BUFFER` - request channel capacity of each table (default: 32)
//! - `CART_NOTICE_CAPACITY` - notices kept for slow subscribers (default: 16)

use crate::store::SyncPolicy;
use std::str::FromStr;
use thiserror::Error;

const DEFAULT_TABLE_BUFFER: usize = 32;
const DEFAULT_NOTICE_CAPACITY: usize = 16;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Runtime settings for the store and the tables behind it.
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    /// What happens to local state when an optimistic write fails remotely.
    pub sync_policy: SyncPolicy,
    pub table_buffer: usize,
    pub notice_capacity: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            sync_policy: SyncPolicy::default(),
            table_buffer: DEFAULT_TABLE_BUFFER,
            notice_capacity: DEFAULT_NOTICE_CAPACITY,
        }
    }
}

impl StoreConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to a value that does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from any key/value source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            sync_policy: parse_or_default(&lookup, "CART_SYNC_POLICY", SyncPolicy::default())?,
            table_buffer: parse_capacity(&lookup, "CART_TABLE_BUFFER", DEFAULT_TABLE_BUFFER)?,
            notice_capacity: parse_capacity(&lookup, "CART_NOTICE_CAPACITY", DEFAULT_NOTICE_CAPACITY)?,
        })
    }
}

fn parse_or_default<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: T,
) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|e: T::Err| ConfigError::InvalidEnvVar(key.to_string(), e.to_string())),
        None => Ok(default),
    }
}

/// Channel capacities must be positive; tokio panics on zero.
fn parse_capacity(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: usize,
) -> Result<usize, ConfigError> {
    let value = parse_or_default(lookup, key, default)?;
    if value == 0 {
        return Err(ConfigError::InvalidEnvVar(
            key.to_string(),
            "must be greater than 0".to_string(),
        ));
    }
    Ok(value)
}
