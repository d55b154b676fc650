use std::path::PathBuf;
use std::sync::Arc;

use crate::application::services::{RenderQueue, ShortlinkStore};
use crate::infrastructure::persistence::JsonSnapshotRepository;

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub shortlinks: Arc<ShortlinkStore<JsonSnapshotRepository>>,
    pub render_queue: RenderQueue,
    /// Absolute base for shortlinks and Open Graph tags, without a trailing slash.
    pub public_base_url: String,
    /// Directory with static assets, including the fallback preview image.
    pub static_dir: PathBuf,
    /// Whether forwarding headers come from a trusted reverse proxy.
    pub behind_proxy: bool,
}
