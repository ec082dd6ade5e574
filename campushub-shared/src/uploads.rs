/// Upload staging
///
/// Uploaded files are written to the upload directory under a generated,
/// collision-resistant name before any database work starts. The returned
/// [`StagedFile`] carries the user-facing file name and the public path that
/// the API serves the file from.
///
/// Staged files are not removed when a later transaction rolls back.

use rand::Rng;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// URL prefix under which staged files are served
pub const PUBLIC_PREFIX: &str = "/uploads";

/// A file persisted to upload storage
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagedFile {
    /// Name the client uploaded the file under
    pub original_name: String,

    /// Public path, e.g. `/uploads/1736000000000-123456789.pdf`
    pub path: String,
}

#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error("Failed to write upload {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Writes uploads into a single directory
#[derive(Debug, Clone)]
pub struct UploadStore {
    dir: PathBuf,
}

impl UploadStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Creates the upload directory if needed.
    pub async fn initialize(&self) -> Result<(), UploadError> {
        fs::create_dir_all(&self.dir).await.map_err(|source| UploadError::Io {
            path: self.dir.clone(),
            source,
        })
    }

    /// Persists `data` and returns where it can be fetched from.
    pub async fn stage(&self, original_name: &str, data: &[u8]) -> Result<StagedFile, UploadError> {
        let file_name = generated_name(original_name);
        let path = self.dir.join(&file_name);

        self.initialize().await?;
        fs::write(&path, data)
            .await
            .map_err(|source| UploadError::Io { path: path.clone(), source })?;

        debug!(file = %file_name, bytes = data.len(), "Staged upload");

        Ok(StagedFile {
            original_name: original_name.to_string(),
            path: format!("{}/{}", PUBLIC_PREFIX, file_name),
        })
    }
}

/// `<unix millis>-<random>` plus the original extension, if it is plain
/// alphanumeric.
fn generated_name(original_name: &str) -> String {
    let millis = chrono::Utc::now().timestamp_millis();
    let nonce: u32 = rand::thread_rng().gen_range(0..1_000_000_000);

    let extension = Path::new(original_name)
        .extension()
        .and_then(|e| e.to_str())
        .filter(|e| !e.is_empty() && e.len() <= 16 && e.chars().all(|c| c.is_ascii_alphanumeric()))
        .map(|e| format!(".{}", e.to_ascii_lowercase()))
        .unwrap_or_default();

    format!("{}-{}{}", millis, nonce, extension)
}
