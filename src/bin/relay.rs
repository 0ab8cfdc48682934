use std::process::ExitCode;

use flashcards_gen::relay::{config::RelayConfig, start_server};
use tracing::error;
use tracing_subscriber::{EnvFilter, fmt};

#[tokio::main]
async fn main() -> ExitCode {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = match RelayConfig::load() {
        Ok(config) => config,
        Err(e) => {
            error!("Environment misconfigured: {e}");
            return ExitCode::FAILURE;
        }
    };

    if let Err(e) = start_server(config).await {
        error!("Relay stopped: {e}");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
