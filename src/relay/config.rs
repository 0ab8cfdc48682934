use std::path::PathBuf;

use crate::config::{ConfigError, try_load};

pub const DEFAULT_PORT: &str = "3001";
pub const DEFAULT_GENERATOR_URL: &str = "http://localhost:8000/generate";
pub const DEFAULT_UPLOAD_DIR: &str = "uploads";

#[derive(Clone, Debug)]
pub struct RelayConfig {
    pub port: u16,
    /// Generation endpoint every upload is forwarded to
    pub generator_url: String,
    /// Where uploads are staged while being forwarded
    pub upload_dir: PathBuf,
}

impl RelayConfig {
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self {
            port: try_load("RELAY_PORT", DEFAULT_PORT)?,
            generator_url: try_load("GENERATOR_URL", DEFAULT_GENERATOR_URL)?,
            upload_dir: try_load("UPLOAD_DIR", DEFAULT_UPLOAD_DIR)?,
        })
    }
}
