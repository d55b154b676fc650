//! Rendering backend trait for social-preview images.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;

/// Errors that can occur while producing a preview image.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// The converter binary could not be located.
    #[error("converter unavailable: {0}")]
    ConverterUnavailable(String),

    /// The converter did not finish in time and was killed.
    #[error("converter timed out after {0:?}")]
    Timeout(Duration),

    /// The converter exited with a non-zero status.
    #[error("converter failed ({status}): {stderr}")]
    ProcessFailure { status: String, stderr: String },

    #[error("render I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to build preview template: {0}")]
    Template(String),

    /// The cache key would not name a single file inside the cache directory.
    #[error("invalid cache key: '{0}'")]
    InvalidKey(String),

    /// The render worker has stopped and no longer accepts jobs.
    #[error("render queue is closed")]
    QueueClosed,
}

/// Produces a PNG preview image for a piece of text.
///
/// Implementations write the image to `output` and nothing else. The caller
/// owns `output`: it is a scratch path that gets renamed into the cache on
/// success and removed on failure.
///
/// # Implementations
///
/// - [`crate::infrastructure::render::RsvgRenderer`] - `rsvg-convert` subprocess
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ImageRenderer: Send + Sync {
    /// Renders `text` into a PNG file at `output`.
    ///
    /// # Errors
    ///
    /// See [`RenderError`].
    async fn render(&self, text: &str, output: &Path) -> Result<(), RenderError>;
}
