//! Front door of the serialized preview image renderer.

use std::path::PathBuf;
use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::domain::render_cache::RenderCache;
use crate::domain::render_job::RenderJob;
use crate::domain::render_worker::run_render_worker;
use crate::domain::repositories::{ImageRenderer, RenderError};

/// Handle to the single render worker.
///
/// Cloning is cheap: every clone feeds the same bounded FIFO channel, and the
/// worker exits once the last clone is dropped.
#[derive(Clone)]
pub struct RenderQueue {
    jobs: mpsc::Sender<RenderJob>,
    cache: RenderCache,
}

impl RenderQueue {
    /// Starts the worker task and returns a handle to it.
    ///
    /// `capacity` bounds the number of jobs waiting behind the one in progress.
    /// Submitters wait for a free slot when the queue is full.
    pub fn spawn(capacity: usize, cache: RenderCache, renderer: Arc<dyn ImageRenderer>) -> Self {
        let (jobs, rx) = mpsc::channel(capacity);
        tokio::spawn(run_render_worker(rx, cache.clone(), renderer));

        Self { jobs, cache }
    }

    /// Ensures a preview image exists for `key` and returns its path.
    ///
    /// A cached image is returned without touching the queue. Otherwise the job
    /// is queued and this call waits for the worker to finish it. Dropping the
    /// returned future does not cancel a job that was already queued.
    ///
    /// # Errors
    ///
    /// Returns [`RenderError::QueueClosed`] if the worker is gone, or the
    /// renderer's error if the job failed.
    pub async fn render(&self, key: &str, text: &str) -> Result<PathBuf, RenderError> {
        let path = self.cache.path_for(key);

        if self.cache.contains(key).await {
            debug!(key = %key, "Preview image served from cache");
            return Ok(path);
        }

        let (job, reply) = RenderJob::new(key.to_string(), text.to_string());

        if self.jobs.send(job).await.is_err() {
            warn!(key = %key, "Render queue is closed");
            return Err(RenderError::QueueClosed);
        }

        reply.await.map_err(|_| RenderError::QueueClosed)??;

        Ok(path)
    }

    /// Cache the worker writes into.
    pub fn cache(&self) -> &RenderCache {
        &self.cache
    }

    /// Returns true if the worker has stopped.
    pub fn is_closed(&self) -> bool {
        self.jobs.is_closed()
    }

    /// Maximum number of jobs the channel can buffer.
    pub fn capacity(&self) -> usize {
        self.jobs.max_capacity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockImageRenderer;

    fn writing_renderer(times: usize) -> MockImageRenderer {
        let mut renderer = MockImageRenderer::new();
        renderer.expect_render().times(times).returning(|_, output| {
            std::fs::write(output, b"png")?;
            Ok(())
        });
        renderer
    }

    #[tokio::test]
    async fn test_render_then_cache_hit() {
        let dir = tempfile::tempdir().unwrap();
        let queue = RenderQueue::spawn(4, RenderCache::new(dir.path()), Arc::new(writing_renderer(1)));

        let first = queue.render("oi-joana", "Oi Joana").await.unwrap();
        let second = queue.render("oi-joana", "Oi Joana").await.unwrap();

        assert_eq!(first, second);
        assert_eq!(first, queue.cache().path_for("oi-joana"));
        assert!(first.is_file());
    }

    #[tokio::test]
    async fn test_renderer_error_propagates() {
        let dir = tempfile::tempdir().unwrap();
        let mut renderer = MockImageRenderer::new();
        renderer
            .expect_render()
            .times(1)
            .returning(|_, _| Err(RenderError::ConverterUnavailable("rsvg-convert".to_string())));

        let queue = RenderQueue::spawn(4, RenderCache::new(dir.path()), Arc::new(renderer));

        let result = queue.render("oi", "Oi").await;
        assert!(matches!(result, Err(RenderError::ConverterUnavailable(_))));
        assert!(!queue.cache().contains("oi").await);
    }

    #[tokio::test]
    async fn test_capacity_reported() {
        let dir = tempfile::tempdir().unwrap();
        let queue = RenderQueue::spawn(32, RenderCache::new(dir.path()), Arc::new(writing_renderer(0)));

        assert_eq!(queue.capacity(), 32);
        assert!(!queue.is_closed());
    }
}
