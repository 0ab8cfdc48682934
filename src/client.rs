//! Desktop side of the upload relay contract.
//!
//! Posts the chosen document to the relay and sorts the answer into a deck,
//! an empty generation, or a connection failure.

use crate::error::GenerateError;
use crate::models::{Deck, Flashcard};
use reqwest::blocking::{Client, multipart::Form};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, warn};

const FALLBACK_DECK_NAME: &str = "flashcards";

#[derive(Deserialize)]
struct GenerationResponse {
    #[serde(default)]
    flashcards: Option<Vec<Flashcard>>,
}

#[derive(Clone)]
pub struct GenerationClient {
    http: Client,
    upload_url: String,
    timeout: Option<Duration>,
}

impl GenerationClient {
    /// Client that waits as long as the relay needs; generation has no deadline
    pub fn new(upload_url: impl Into<String>) -> Result<Self, GenerateError> {
        Self::with_timeout(upload_url, None)
    }

    pub fn with_timeout(
        upload_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, GenerateError> {
        // reqwest's blocking client gives up after 30s unless told otherwise
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(GenerateError::network)?;

        Ok(Self {
            http,
            upload_url: upload_url.into(),
            timeout,
        })
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn upload_url(&self) -> &str {
        &self.upload_url
    }

    /// Uploads `path` and waits for the generated deck. Blocks the calling thread.
    pub fn generate(&self, path: &Path) -> Result<Deck, GenerateError> {
        let form = Form::new()
            .file("file", path)
            .map_err(GenerateError::network)?;

        debug!("Uploading {} to {}", path.display(), self.upload_url);
        let response = self
            .http
            .post(&self.upload_url)
            .multipart(form)
            .send()
            .map_err(|e| {
                warn!("Relay unreachable: {e}");
                GenerateError::network(e)
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!("Relay answered {status}");
            return Err(GenerateError::network(format!("relay answered {status}")));
        }

        let body = response.text().map_err(GenerateError::network)?;
        parse_generation_response(&deck_name(path), &body)
    }
}

/// Turns a relay response body into a deck named `name`.
/// A missing, null or empty `flashcards` list counts as an empty generation.
pub fn parse_generation_response(name: &str, body: &str) -> Result<Deck, GenerateError> {
    let response: GenerationResponse =
        serde_json::from_str(body).map_err(GenerateError::network)?;

    Deck::new(name, response.flashcards.unwrap_or_default())
        .map_err(|_| GenerateError::EmptyGenerationResult)
}

/// Deck name shown for a source document: its file stem
pub fn deck_name(path: &Path) -> String {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .filter(|stem| !stem.is_empty())
        .unwrap_or_else(|| FALLBACK_DECK_NAME.to_string())
}
