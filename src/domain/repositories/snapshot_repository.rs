//! Repository trait for the shortlink snapshot.

use std::collections::BTreeMap;

use async_trait::async_trait;

/// The persisted forward index: short code to destination path.
pub type Snapshot = BTreeMap<String, String>;

/// Errors raised while reading or writing the snapshot.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("snapshot is malformed: {0}")]
    Malformed(String),
}

/// Durable storage for the shortlink forward index.
///
/// The reverse index is never persisted; callers rebuild it from the loaded
/// snapshot.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::JsonSnapshotRepository`] - JSON file on disk
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SnapshotRepository: Send + Sync {
    /// Reads the persisted snapshot.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(snapshot))` if a snapshot exists
    /// - `Ok(None)` if nothing has been persisted yet
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Malformed`] if the stored data cannot be decoded,
    /// [`SnapshotError::Io`] for any other read failure.
    async fn load(&self) -> Result<Option<Snapshot>, SnapshotError>;

    /// Replaces the persisted snapshot with `snapshot`.
    ///
    /// # Errors
    ///
    /// Returns [`SnapshotError::Io`] if the snapshot cannot be written.
    async fn save(&self, snapshot: &Snapshot) -> Result<(), SnapshotError>;
}
