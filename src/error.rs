//! Failures the desktop side can surface to the user.
//! The display text of each variant is exactly what the user sees.
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GenerateError {
    /// The relay answered, but no usable card came back
    #[error("No flashcards could be generated from this content.")]
    EmptyGenerationResult,

    /// The relay could not be reached, refused the upload, or answered with garbage
    #[error("Error connecting to server. Is the backend running?")]
    NetworkError { detail: String },
}

impl GenerateError {
    pub fn network(detail: impl ToString) -> Self {
        Self::NetworkError {
            detail: detail.to_string(),
        }
    }
}
