//! In-memory shortlink store with snapshot persistence.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::{OnceCell, RwLock};
use tracing::{error, info, warn};

use crate::domain::entities::Shortlink;
use crate::domain::repositories::{Snapshot, SnapshotError, SnapshotRepository};
use crate::utils::code_generator::generate_code;

/// Candidate codes tried before giving up on a single creation.
pub const MAX_CODE_ATTEMPTS: usize = 10;

/// Errors returned by [`ShortlinkStore`].
#[derive(Debug, thiserror::Error)]
pub enum ShortlinkError {
    /// The snapshot exists but could not be read or decoded.
    #[error("failed to load shortlinks: {0}")]
    Load(#[source] SnapshotError),

    /// Every candidate code collided with an existing one.
    #[error("no unique code found after {attempts} attempts")]
    CodeExhaustion { attempts: usize },

    /// The snapshot could not be written; the new entry was rolled back.
    #[error("failed to persist shortlinks: {0}")]
    Persist(#[source] SnapshotError),

    #[error("shortlink '{code}' not found")]
    NotFound { code: String },

    /// The creation task ended abnormally.
    #[error("shortlink task failed: {0}")]
    Task(String),
}

/// Forward and reverse indices, always mutated together.
///
/// Both indices hold the same entries, with one exception: a snapshot written
/// elsewhere may map one path to several codes. Every such code stays in
/// `by_code` and still resolves, while `by_path` keeps only the first, so the
/// sizes differ. The store itself never creates a second code for a path.
#[derive(Debug, Default)]
struct Indices {
    by_code: Snapshot,
    by_path: HashMap<String, String>,
}

impl Indices {
    fn from_snapshot(by_code: Snapshot) -> Self {
        let mut by_path = HashMap::with_capacity(by_code.len());

        for (code, path) in &by_code {
            if let Some(previous) = by_path.get(path) {
                warn!(
                    path = %path,
                    kept = %previous,
                    ignored = %code,
                    "Snapshot maps one path to several codes; all codes still resolve"
                );
                continue;
            }
            by_path.insert(path.clone(), code.clone());
        }

        Self { by_code, by_path }
    }

    fn insert(&mut self, code: &str, path: &str) {
        self.by_code.insert(code.to_string(), path.to_string());
        self.by_path.insert(path.to_string(), code.to_string());
    }

    fn remove(&mut self, code: &str, path: &str) {
        self.by_code.remove(code);
        self.by_path.remove(path);
    }
}

type CodeGenerator = Box<dyn Fn() -> String + Send + Sync>;

/// Durable, unique, idempotent mapping from short codes to destination paths.
///
/// # Loading
///
/// The snapshot is read lazily by [`Self::ensure_loaded`], exactly once even under
/// concurrent first use. A failed load leaves the store unloaded, and the next
/// call tries again.
///
/// # Locking
///
/// A single [`RwLock`] guards both indices. Creation holds the write lock for
/// the whole lookup, insert and persist sequence, so the snapshot file is never
/// written concurrently. Lookups share the read lock.
pub struct ShortlinkStore<R: SnapshotRepository> {
    repository: Arc<R>,
    indices: RwLock<Indices>,
    loaded: OnceCell<()>,
    generate: CodeGenerator,
}

impl<R: SnapshotRepository + 'static> ShortlinkStore<R> {
    /// Creates an unloaded store backed by `repository`.
    pub fn new(repository: Arc<R>) -> Self {
        Self::with_code_generator(repository, generate_code)
    }

    /// Creates a store that draws candidate codes from `generate`.
    pub fn with_code_generator(
        repository: Arc<R>,
        generate: impl Fn() -> String + Send + Sync + 'static,
    ) -> Self {
        Self {
            repository,
            indices: RwLock::new(Indices::default()),
            loaded: OnceCell::new(),
            generate: Box::new(generate),
        }
    }

    /// Loads the persisted snapshot on first call.
    ///
    /// A missing snapshot counts as an empty store. Later calls return
    /// immediately.
    ///
    /// # Errors
    ///
    /// Returns [`ShortlinkError::Load`] if the snapshot exists but is unreadable
    /// or malformed.
    pub async fn ensure_loaded(&self) -> Result<(), ShortlinkError> {
        self.loaded
            .get_or_try_init(|| async {
                let snapshot = self
                    .repository
                    .load()
                    .await
                    .map_err(|e| {
                        error!(error = %e, "Failed to load shortlink snapshot");
                        ShortlinkError::Load(e)
                    })?
                    .unwrap_or_default();

                let mut indices = self.indices.write().await;
                *indices = Indices::from_snapshot(snapshot);
                info!(entries = indices.by_code.len(), "Shortlinks loaded");
                Ok::<(), ShortlinkError>(())
            })
            .await
            .map(|_| ())
    }

    /// Returns true once the snapshot has been loaded successfully.
    pub fn is_loaded(&self) -> bool {
        self.loaded.initialized()
    }

    /// Returns the code for `path`, minting and persisting a new one if needed.
    ///
    /// Repeated calls with the same `path` return the same code and never write.
    /// The critical section runs on its own task, so a caller that goes away
    /// mid-request cannot leave an unpersisted entry behind.
    ///
    /// # Errors
    ///
    /// - [`ShortlinkError::Load`] if the store cannot be loaded
    /// - [`ShortlinkError::CodeExhaustion`] if no unique code was found
    /// - [`ShortlinkError::Persist`] if the snapshot write failed (nothing is kept)
    pub async fn get_or_create(self: &Arc<Self>, path: &str) -> Result<Shortlink, ShortlinkError> {
        self.ensure_loaded().await?;

        let store = Arc::clone(self);
        let path = path.to_string();

        tokio::spawn(async move { store.get_or_create_locked(path).await })
            .await
            .map_err(|e| ShortlinkError::Task(e.to_string()))?
    }

    async fn get_or_create_locked(&self, path: String) -> Result<Shortlink, ShortlinkError> {
        let mut indices = self.indices.write().await;

        if let Some(code) = indices.by_path.get(&path) {
            return Ok(Shortlink::existing(code.clone(), path));
        }

        let code = self.unique_code(&indices)?;
        indices.insert(&code, &path);

        if let Err(e) = self.repository.save(&indices.by_code).await {
            indices.remove(&code, &path);
            error!(code = %code, path = %path, error = %e, "Failed to persist shortlink, rolled back");
            return Err(ShortlinkError::Persist(e));
        }

        info!(code = %code, path = %path, "Shortlink created");
        metrics::counter!("shortlinks_created_total").increment(1);

        Ok(Shortlink::created(code, path))
    }

    fn unique_code(&self, indices: &Indices) -> Result<String, ShortlinkError> {
        for _ in 0..MAX_CODE_ATTEMPTS {
            let code = (self.generate)();
            if !indices.by_code.contains_key(&code) {
                return Ok(code);
            }
        }

        warn!(attempts = MAX_CODE_ATTEMPTS, "Shortlink code space exhausted");
        Err(ShortlinkError::CodeExhaustion {
            attempts: MAX_CODE_ATTEMPTS,
        })
    }

    /// Returns the destination path for `code`.
    ///
    /// # Errors
    ///
    /// - [`ShortlinkError::Load`] if the store cannot be loaded
    /// - [`ShortlinkError::NotFound`] if the code is unknown
    pub async fn resolve(&self, code: &str) -> Result<String, ShortlinkError> {
        self.ensure_loaded().await?;

        self.indices
            .read()
            .await
            .by_code
            .get(code)
            .cloned()
            .ok_or_else(|| ShortlinkError::NotFound {
                code: code.to_string(),
            })
    }

    /// Returns all entries ordered by code.
    ///
    /// # Errors
    ///
    /// Returns [`ShortlinkError::Load`] if the store cannot be loaded.
    pub async fn entries(&self) -> Result<Vec<(String, String)>, ShortlinkError> {
        self.ensure_loaded().await?;

        Ok(self
            .indices
            .read()
            .await
            .by_code
            .iter()
            .map(|(code, path)| (code.clone(), path.clone()))
            .collect())
    }

    /// Sizes of the forward and reverse indices.
    ///
    /// Equal unless a loaded snapshot maps one path to several codes.
    pub async fn index_sizes(&self) -> (usize, usize) {
        let indices = self.indices.read().await;
        (indices.by_code.len(), indices.by_path.len())
    }
}
