mod app;

use app::FlashcardsApp;
use flashcards_gen::client::GenerationClient;
use flashcards_gen::config::DesktopConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> eframe::Result<()> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let config = DesktopConfig::load().unwrap_or_else(|e| {
        warn!("{e}, falling back to defaults");
        DesktopConfig::default()
    });
    info!("Using relay at {}", config.relay_url);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([560.0, 720.0]),
        ..Default::default()
    };
    eframe::run_native(
        "FlashcardsGen",
        options,
        Box::new(move |_cc| {
            let client = GenerationClient::new(config.relay_url)?;
            Ok(Box::new(FlashcardsApp::new(client)))
        }),
    )
}
