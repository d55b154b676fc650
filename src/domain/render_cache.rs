//! On-disk layout of the preview image cache.

use std::path::{Path, PathBuf};

/// Maps cache keys to PNG files under `<cache_dir>/og/`.
///
/// Handlers use [`RenderCache::path_for`] to serve a file after a successful
/// render, and the worker uses the same convention to write it. Entries are
/// immutable once present.
#[derive(Debug, Clone)]
pub struct RenderCache {
    root: PathBuf,
}

impl RenderCache {
    /// Creates a cache rooted at `<cache_dir>/og`.
    pub fn new(cache_dir: impl AsRef<Path>) -> Self {
        Self {
            root: cache_dir.as_ref().join("og"),
        }
    }

    /// Directory holding the rendered images.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Final location of the image for `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.root.join(format!("{key}.png"))
    }

    /// Scratch location the renderer writes to before the file is moved into place.
    ///
    /// Dot-prefixed so it can never collide with a key's final file.
    pub fn scratch_path_for(&self, key: &str) -> PathBuf {
        self.root
            .join(format!(".{key}.{}.tmp", std::process::id()))
    }

    /// Returns true if a finished image exists for `key`.
    pub async fn contains(&self, key: &str) -> bool {
        tokio::fs::metadata(self.path_for(key))
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false)
    }

    /// Creates the cache directory if needed.
    pub async fn prepare(&self) -> std::io::Result<()> {
        tokio::fs::create_dir_all(&self.root).await
    }

    /// Atomically publishes a finished scratch file as the image for `key`.
    pub async fn commit(&self, scratch: &Path, key: &str) -> std::io::Result<()> {
        tokio::fs::rename(scratch, self.path_for(key)).await
    }
}

/// Returns true if `key` is safe to use as a file name inside the cache.
///
/// Keys produced by [`crate::utils::message::og_cache_key`] always pass.
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key.len() <= 64
        && key
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_layout() {
        let cache = RenderCache::new("/var/cache/parabens.vc");
        assert_eq!(
            cache.path_for("feliz-aniversario"),
            PathBuf::from("/var/cache/parabens.vc/og/feliz-aniversario.png")
        );
        assert_eq!(cache.root(), Path::new("/var/cache/parabens.vc/og"));
    }

    #[test]
    fn test_scratch_path_is_hidden_sibling() {
        let cache = RenderCache::new("/tmp/c");
        let scratch = cache.scratch_path_for("hi");
        assert_eq!(scratch.parent(), Some(cache.root()));
        assert!(
            scratch
                .file_name()
                .unwrap()
                .to_string_lossy()
                .starts_with(".hi.")
        );
        assert_ne!(scratch, cache.path_for("hi"));
    }

    #[test]
    fn test_valid_keys() {
        assert!(is_valid_key("default"));
        assert!(is_valid_key("test-message-2024"));
        assert!(!is_valid_key(""));
        assert!(!is_valid_key("../etc/passwd"));
        assert!(!is_valid_key("Upper"));
        assert!(!is_valid_key("a/b"));
        assert!(!is_valid_key(&"a".repeat(65)));
    }

    #[tokio::test]
    async fn test_contains_and_commit() {
        let dir = tempfile::tempdir().unwrap();
        let cache = RenderCache::new(dir.path());

        assert!(!cache.contains("hello").await);

        cache.prepare().await.unwrap();
        let scratch = cache.scratch_path_for("hello");
        tokio::fs::write(&scratch, b"png").await.unwrap();
        assert!(!cache.contains("hello").await);

        cache.commit(&scratch, "hello").await.unwrap();
        assert!(cache.contains("hello").await);
        assert!(!scratch.exists());
    }
}
