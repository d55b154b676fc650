//! Background worker that renders preview images one at a time.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, error, info};

use crate::domain::render_cache::{RenderCache, is_valid_key};
use crate::domain::render_job::RenderJob;
use crate::domain::repositories::{ImageRenderer, RenderError};

/// How a successfully completed job was satisfied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The image already existed; the renderer was not invoked.
    Cached,
    /// The renderer produced a new image.
    Rendered,
}

impl RenderOutcome {
    fn as_str(self) -> &'static str {
        match self {
            Self::Cached => "cached",
            Self::Rendered => "rendered",
        }
    }
}

/// Consumes render jobs in arrival order until every sender is dropped.
///
/// This is the only consumer of the job channel, so at most one render runs at
/// any time. Each job's result is sent back over its own completion channel.
pub async fn run_render_worker(
    mut rx: mpsc::Receiver<RenderJob>,
    cache: RenderCache,
    renderer: Arc<dyn ImageRenderer>,
) {
    while let Some(job) = rx.recv().await {
        let result = process_job(&cache, renderer.as_ref(), &job.key, &job.text).await;

        match &result {
            Ok(outcome) => {
                debug!(key = %job.key, outcome = outcome.as_str(), "Preview image ready");
                metrics::counter!("og_renders_total", "outcome" => outcome.as_str()).increment(1);
            }
            Err(e) => {
                error!(key = %job.key, text = %job.text, error = %e, "Preview image render failed");
                metrics::counter!("og_renders_total", "outcome" => "failed").increment(1);
            }
        }

        job.complete(result.map(|_| ()));
    }

    info!("Render worker stopped");
}

/// Materializes the cache entry for `key`, rendering only on a cache miss.
///
/// The renderer writes to a scratch file that is renamed into place only on
/// success, so a partially written image is never visible under the final name.
pub async fn process_job(
    cache: &RenderCache,
    renderer: &dyn ImageRenderer,
    key: &str,
    text: &str,
) -> Result<RenderOutcome, RenderError> {
    if !is_valid_key(key) {
        return Err(RenderError::InvalidKey(key.to_string()));
    }

    if cache.contains(key).await {
        return Ok(RenderOutcome::Cached);
    }

    cache.prepare().await?;
    let scratch = cache.scratch_path_for(key);

    if let Err(e) = renderer.render(text, &scratch).await {
        discard(&scratch).await;
        return Err(e);
    }

    if let Err(e) = cache.commit(&scratch, key).await {
        discard(&scratch).await;
        return Err(e.into());
    }

    Ok(RenderOutcome::Rendered)
}

async fn discard(scratch: &std::path::Path) {
    match tokio::fs::remove_file(scratch).await {
        Ok(()) => {}
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => error!(path = %scratch.display(), error = %e, "Failed to remove scratch file"),
    }
}
