use std::sync::Arc;

use reqwest::Client;

use super::config::RelayConfig;

/// Read-only state shared by every request
pub struct RelayState {
    pub config: RelayConfig,
    pub http: Client,
}

impl RelayState {
    pub fn new(config: RelayConfig) -> Arc<Self> {
        Arc::new(Self {
            config,
            http: Client::new(),
        })
    }
}
