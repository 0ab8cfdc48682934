//! Upload relay: accepts a document on `POST /api/upload`, forwards it to the
//! generation service and returns the generated flashcards.
//!
//! Each upload is staged to a private temporary file that is removed whether
//! forwarding succeeds or not. Nothing is kept between requests.

use std::{io, sync::Arc};

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{Method, header::CONTENT_TYPE},
    routing::post,
};
#[cfg(unix)]
use tokio::signal::unix::{SignalKind, signal};
use tokio::{net::TcpListener, signal::ctrl_c};
use tower_http::cors::{Any, CorsLayer};
use tracing::info;

pub mod config;
pub mod error;
pub mod routes;
pub mod staging;
pub mod state;

use config::RelayConfig;
use routes::upload_handler;
use state::RelayState;

pub fn router(state: Arc<RelayState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([CONTENT_TYPE]);

    Router::new()
        .route("/api/upload", post(upload_handler))
        // The 10MB ceiling is advisory, not enforced here
        .layer(DefaultBodyLimit::disable())
        .layer(cors)
        .with_state(state)
}

pub async fn start_server(config: RelayConfig) -> io::Result<()> {
    info!("Initializing state...");
    let state = RelayState::new(config);

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");
    let listener = TcpListener::bind(&address).await?;
    info!(
        "Relay running on {address}, forwarding to {}",
        state.config.generator_url
    );

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Relay shutting down...");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if ctrl_c().await.is_ok() {
            info!("Received Ctrl+C, shutting down");
        } else {
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(_) => std::future::pending::<()>().await,
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
