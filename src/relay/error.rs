use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

#[derive(Error, Debug)]
pub enum RelayError {
    #[error("No file uploaded")]
    NoFileProvided,

    #[error("Failed to generate flashcards")]
    DownstreamUnavailableOrFailed(#[from] reqwest::Error),

    #[error("Failed to generate flashcards")]
    MalformedDownstream(#[from] serde_json::Error),

    #[error("Failed to generate flashcards")]
    Staging(#[from] std::io::Error),
}

impl IntoResponse for RelayError {
    fn into_response(self) -> Response {
        let status = match self {
            RelayError::NoFileProvided => StatusCode::BAD_REQUEST,
            RelayError::DownstreamUnavailableOrFailed(ref e) => {
                error!("Error connecting to AI service: {e}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            RelayError::MalformedDownstream(ref e) => {
                error!("AI service answered with invalid JSON: {e}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
            RelayError::Staging(ref e) => {
                error!("Could not stage upload: {e}");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
