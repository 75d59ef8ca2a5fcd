//! Delivery of finished files.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use pkn_common::error::{PknError, PknResult};

/// Hands a finished file to the user.
#[async_trait]
pub trait DownloadSink: Send + Sync {
    /// Deliver `bytes` under `filename` and return where it ended up.
    async fn deliver(&self, filename: &str, bytes: &[u8]) -> PknResult<PathBuf>;
}

/// Writes files into a directory, creating it when missing.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    dir: PathBuf,
}

impl DirectorySink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

#[async_trait]
impl DownloadSink for DirectorySink {
    async fn deliver(&self, filename: &str, bytes: &[u8]) -> PknResult<PathBuf> {
        if filename.is_empty() || filename.contains(['/', '\\']) {
            return Err(PknError::delivery(format!("Invalid file name: {filename:?}")));
        }
        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            PknError::delivery(format!("Cannot create {}: {e}", self.dir.display()))
        })?;
        let path = self.dir.join(filename);
        tokio::fs::write(&path, bytes)
            .await
            .map_err(|e| PknError::delivery(format!("Cannot write {}: {e}", path.display())))?;
        debug!(path = %path.display(), bytes = bytes.len(), "Delivered file");
        Ok(path)
    }
}
