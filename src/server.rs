//! HTTP server initialization and runtime setup.
//!
//! Handles shortlink store loading, render worker spawning, and the Axum
//! server lifecycle.

use crate::application::services::{RenderQueue, ShortlinkStore};
use crate::config::Config;
use crate::domain::render_cache::RenderCache;
use crate::infrastructure::persistence::JsonSnapshotRepository;
use crate::infrastructure::render::RsvgRenderer;
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use std::net::SocketAddr;
use std::sync::Arc;

/// Services shared by the server and the admin CLI.
pub struct Services {
    pub shortlinks: Arc<ShortlinkStore<JsonSnapshotRepository>>,
    pub render_queue: RenderQueue,
}

/// Builds the shortlink store and starts the render worker.
///
/// Must be called from within a Tokio runtime.
pub fn build_services(config: &Config) -> Services {
    let repository = Arc::new(JsonSnapshotRepository::new(&config.shortlink_db_path));
    let shortlinks = Arc::new(ShortlinkStore::new(repository));

    let renderer = RsvgRenderer::new(&config.og_converter, config.og_render_timeout);
    if let Err(e) = renderer.locate_converter() {
        tracing::warn!("{e}. Preview images will use the static fallback.");
    }

    let render_queue = RenderQueue::spawn(
        config.og_queue_capacity,
        RenderCache::new(&config.cache_dir),
        Arc::new(renderer),
    );

    Services {
        shortlinks,
        render_queue,
    }
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Shortlink store (snapshot loaded eagerly, retried lazily on failure)
/// - Background render worker
/// - Axum HTTP server with graceful shutdown on Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - The listen address is invalid
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let services = build_services(&config);

    match services.shortlinks.ensure_loaded().await {
        Ok(()) => tracing::info!("Shortlink store ready"),
        Err(e) => tracing::warn!("Shortlink store not loaded: {e}. Will retry on first use."),
    }
    tracing::info!("Render worker started");

    let state = AppState {
        shortlinks: services.shortlinks,
        render_queue: services.render_queue,
        public_base_url: config.base_url().to_string(),
        static_dir: config.static_dir.clone(),
        behind_proxy: config.behind_proxy,
    };

    let app = app_router(state);

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid listen address '{}'", config.listen_addr))?;
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    tracing::info!("Listening on http://{addr}");

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
