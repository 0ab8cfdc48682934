//! Environment-driven settings. Every setting has a default, so both binaries
//! run out of the box against a local relay and generation service.
use std::{env, fmt::Display, str::FromStr};

use thiserror::Error;
use tracing::{info, warn};

pub const DEFAULT_RELAY_URL: &str = "http://localhost:3001/api/upload";

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid value for {key}: {message}")]
pub struct ConfigError {
    pub key: String,
    pub message: String,
}

/// Settings of the desktop front end
#[derive(Clone, Debug)]
pub struct DesktopConfig {
    pub relay_url: String,
}

impl DesktopConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self {
            relay_url: try_load("RELAY_URL", DEFAULT_RELAY_URL)?,
        })
    }
}

impl Default for DesktopConfig {
    fn default() -> Self {
        Self {
            relay_url: DEFAULT_RELAY_URL.to_string(),
        }
    }
}

fn var(key: &str) -> Option<String> {
    env::var(key).ok()
}

/// Reads `key` from the environment, falling back to `default` when unset.
pub fn try_load<T: FromStr>(key: &str, default: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    let raw = var(key).unwrap_or_else(|| {
        info!("{key} not set, using default: {default}");
        default.to_string()
    });
    parse_setting(key, &raw)
}

pub fn parse_setting<T: FromStr>(key: &str, raw: &str) -> Result<T, ConfigError>
where
    T::Err: Display,
{
    raw.trim().parse().map_err(|e: T::Err| {
        warn!("Invalid {key} value: {e}");
        ConfigError {
            key: key.to_string(),
            message: e.to_string(),
        }
    })
}
