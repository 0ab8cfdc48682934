//! Temporary on-disk copy of an upload while it is forwarded.
//!
//! A [`StagedUpload`] owns its file: dropping the value deletes it, so every
//! exit path of the handler (success, downstream failure, early `?`) cleans up.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use axum::extract::multipart::Field;
use tokio::{fs, io::AsyncWriteExt};
use tracing::{debug, warn};
use uuid::Uuid;

use super::error::RelayError;

const FALLBACK_FILE_NAME: &str = "upload";

#[derive(Debug)]
pub struct StagedUpload {
    path: PathBuf,
    original_name: String,
}

impl StagedUpload {
    /// Streams one multipart field into a fresh file under `upload_dir`.
    pub async fn from_field(field: &mut Field<'_>, upload_dir: &Path) -> Result<Self, RelayError> {
        fs::create_dir_all(upload_dir).await?;

        let original_name = field
            .file_name()
            .filter(|name| !name.is_empty())
            .unwrap_or(FALLBACK_FILE_NAME)
            .to_string();

        // Guard exists before the first byte is written, so partial files are removed too
        let staged = Self {
            path: upload_dir.join(Uuid::new_v4().to_string()),
            original_name,
        };

        let mut file = fs::File::create(&staged.path).await?;
        let mut size = 0usize;
        while let Some(chunk) = field.chunk().await.map_err(|e| {
            RelayError::Staging(std::io::Error::new(ErrorKind::InvalidData, e.to_string()))
        })? {
            size += chunk.len();
            file.write_all(&chunk).await?;
        }
        file.flush().await?;

        debug!(
            "Staged '{}' ({size} bytes) at {}",
            staged.original_name,
            staged.path.display()
        );
        Ok(staged)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn original_name(&self) -> &str {
        &self.original_name
    }
}

impl Drop for StagedUpload {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => debug!("Cleanup: removed {}", self.path.display()),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!("Could not remove staged upload {}: {e}", self.path.display()),
        }
    }
}
