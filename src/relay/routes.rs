use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Multipart, State, multipart::MultipartRejection},
    http::{HeaderValue, header::CONTENT_TYPE},
    response::{IntoResponse, Response},
};
use reqwest::multipart::{Form, Part};
use serde::de::IgnoredAny;
use tracing::{info, warn};

use super::{error::RelayError, staging::StagedUpload, state::RelayState};

pub const UPLOAD_FIELD: &str = "file";

/// `POST /api/upload`: stages the `file` field, forwards it to the generation
/// service and hands its JSON back byte for byte.
pub async fn upload_handler(
    State(state): State<Arc<RelayState>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, RelayError> {
    let mut multipart = multipart.map_err(|e| {
        warn!("Rejected upload: {e}");
        RelayError::NoFileProvided
    })?;

    let staged = stage_upload(&mut multipart, &state).await?;
    info!("Forwarding '{}' to {}", staged.original_name(), state.config.generator_url);

    let (content_type, body) = forward(&state, &staged).await?;
    Ok(([(CONTENT_TYPE, content_type)], body).into_response())
}

/// Finds the upload field and stages it; other fields are skipped.
async fn stage_upload(
    multipart: &mut Multipart,
    state: &RelayState,
) -> Result<StagedUpload, RelayError> {
    loop {
        let mut field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => return Err(RelayError::NoFileProvided),
            Err(e) => {
                warn!("Malformed multipart body: {e}");
                return Err(RelayError::NoFileProvided);
            }
        };

        if field.name() == Some(UPLOAD_FIELD) {
            return StagedUpload::from_field(&mut field, &state.config.upload_dir).await;
        }
    }
}

/// Returns the generator's content type and raw body; the body must be valid JSON.
async fn forward(
    state: &RelayState,
    staged: &StagedUpload,
) -> Result<(HeaderValue, Bytes), RelayError> {
    let bytes = tokio::fs::read(staged.path()).await?;
    let part = Part::bytes(bytes).file_name(staged.original_name().to_string());
    let form = Form::new().part(UPLOAD_FIELD, part);

    let response = state
        .http
        .post(&state.config.generator_url)
        .multipart(form)
        .send()
        .await?
        .error_for_status()?;

    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .cloned()
        .unwrap_or_else(|| HeaderValue::from_static("application/json"));
    let body = response.bytes().await?;
    serde_json::from_slice::<IgnoredAny>(&body)?;

    Ok((content_type, body))
}
