#![allow(dead_code)]

use async_trait::async_trait;
use axum::extract::ConnectInfo;
use parabens::application::services::{RenderQueue, ShortlinkStore};
use parabens::domain::render_cache::RenderCache;
use parabens::domain::repositories::{ImageRenderer, RenderError};
use parabens::infrastructure::persistence::JsonSnapshotRepository;
use parabens::state::AppState;
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;
use tempfile::TempDir;
use tower::Layer;

pub const BASE_URL: &str = "https://parabens.vc";

/// Bytes of the static fallback image written into every test static dir.
pub const FALLBACK_PNG: &[u8] = b"fallback-png";

/// Bytes the fake renderer writes for a successful render.
pub const RENDERED_PNG: &[u8] = b"rendered-png";

#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}

/// Renderer double that records how it was driven.
pub struct FakeRenderer {
    fail: bool,
    delay: Duration,
    calls: AtomicUsize,
    active: AtomicUsize,
    max_active: AtomicUsize,
}

impl FakeRenderer {
    pub fn succeeding() -> Self {
        Self::new(false, Duration::ZERO)
    }

    pub fn failing() -> Self {
        Self::new(true, Duration::ZERO)
    }

    pub fn slow(delay: Duration) -> Self {
        Self::new(false, delay)
    }

    fn new(fail: bool, delay: Duration) -> Self {
        Self {
            fail,
            delay,
            calls: AtomicUsize::new(0),
            active: AtomicUsize::new(0),
            max_active: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Highest number of renders observed running at the same time.
    pub fn max_active(&self) -> usize {
        self.max_active.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ImageRenderer for FakeRenderer {
    async fn render(&self, _text: &str, output: &Path) -> Result<(), RenderError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_active.fetch_max(now, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let result = if self.fail {
            // Leave a partial file behind so callers must clean up.
            tokio::fs::write(output, b"partial").await?;
            Err(RenderError::ProcessFailure {
                status: "exit status: 1".to_string(),
                stderr: "boom".to_string(),
            })
        } else {
            tokio::fs::write(output, RENDERED_PNG).await.map_err(RenderError::from)
        };

        self.active.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

/// Application state backed by temporary directories.
pub struct TestContext {
    pub state: AppState,
    pub renderer: Arc<FakeRenderer>,
    pub dir: TempDir,
}

impl TestContext {
    pub fn snapshot_path(&self) -> PathBuf {
        self.dir.path().join("data").join("shortlinks.json")
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.dir.path().join("cache")
    }
}

pub fn create_test_state() -> TestContext {
    create_test_state_with(FakeRenderer::succeeding())
}

pub fn create_test_state_with(renderer: FakeRenderer) -> TestContext {
    let dir = tempfile::tempdir().unwrap();

    let static_dir = dir.path().join("static");
    std::fs::create_dir_all(&static_dir).unwrap();
    std::fs::write(static_dir.join("og-image.png"), FALLBACK_PNG).unwrap();
    std::fs::write(static_dir.join("styles.css"), "body{}").unwrap();
    std::fs::write(static_dir.join("app.js"), "void 0;").unwrap();
    std::fs::write(static_dir.join("favicon.svg"), "<svg/>").unwrap();
    std::fs::write(static_dir.join("og-image.svg"), "<svg/>").unwrap();

    let repository = Arc::new(JsonSnapshotRepository::new(
        dir.path().join("data").join("shortlinks.json"),
    ));
    let shortlinks = Arc::new(ShortlinkStore::new(repository));

    let renderer = Arc::new(renderer);
    let render_queue = RenderQueue::spawn(
        8,
        RenderCache::new(dir.path().join("cache")),
        renderer.clone(),
    );

    let state = AppState {
        shortlinks,
        render_queue,
        public_base_url: BASE_URL.to_string(),
        static_dir,
        behind_proxy: false,
    };

    TestContext {
        state,
        renderer,
        dir,
    }
}
