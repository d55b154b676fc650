//! JSON file implementation of the snapshot repository.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use crate::domain::repositories::{Snapshot, SnapshotError, SnapshotRepository};

/// Stores the shortlink snapshot as a pretty-printed JSON object of code to path.
///
/// Every save rewrites the whole file. The new content goes to a sibling
/// temporary file first and is renamed over the snapshot, so readers never see
/// a half-written file.
#[derive(Debug, Clone)]
pub struct JsonSnapshotRepository {
    path: PathBuf,
}

impl JsonSnapshotRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "shortlinks.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl SnapshotRepository for JsonSnapshotRepository {
    async fn load(&self) -> Result<Option<Snapshot>, SnapshotError> {
        let data = match tokio::fs::read(&self.path).await {
            Ok(data) => data,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path.display(), "No shortlink snapshot yet");
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let snapshot: Option<Snapshot> = serde_json::from_slice(&data)
            .map_err(|e| SnapshotError::Malformed(format!("{}: {e}", self.path.display())))?;

        Ok(Some(snapshot.unwrap_or_default()))
    }

    async fn save(&self, snapshot: &Snapshot) -> Result<(), SnapshotError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let data = serde_json::to_vec_pretty(snapshot)
            .map_err(|e| SnapshotError::Malformed(e.to_string()))?;

        let temp = self.temp_path();
        tokio::fs::write(&temp, &data).await?;

        if let Err(e) = tokio::fs::rename(&temp, &self.path).await {
            let _ = tokio::fs::remove_file(&temp).await;
            return Err(e.into());
        }

        debug!(path = %self.path.display(), entries = snapshot.len(), "Shortlink snapshot saved");
        Ok(())
    }
}
