//! Handler for social-preview images.

use std::path::Path;

use axum::{
    extract::{Query, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::{error, warn};

use crate::state::AppState;
use crate::utils::blocklist::is_blocked_message;
use crate::utils::message::{og_cache_key, og_image_text_prefix};
use crate::utils::path_guard::looks_like_path;

/// File name of the static image served when no personalized one is available.
pub const FALLBACK_IMAGE: &str = "og-image.png";

const IMAGE_CACHE_CONTROL: &str = "public, max-age=86400";

#[derive(Debug, Default, Deserialize)]
pub struct OgImageQuery {
    #[serde(default)]
    pub text: String,
}

/// Serves the preview image for `?text=`.
///
/// # Endpoint
///
/// `GET|HEAD /og-image.png?text=...`
///
/// # Behavior
///
/// - Empty, blocked or scanner-looking text gets the static fallback image
/// - Cached images are served straight from disk
/// - Otherwise the image is rendered through the render queue; this request
///   waits for it
/// - Render failures are logged and answered with the fallback image
pub async fn og_image_handler(
    State(state): State<AppState>,
    Query(query): Query<OgImageQuery>,
) -> Response {
    let text = og_image_text_prefix(&query.text);
    if text.is_empty() || looks_like_path(&text) || is_blocked_message(&text) {
        return fallback_image(&state.static_dir).await;
    }

    let key = og_cache_key(&text);

    let path = match state.render_queue.render(&key, &text).await {
        Ok(path) => path,
        Err(e) => {
            warn!(key = %key, error = %e, "Serving fallback preview image");
            return fallback_image(&state.static_dir).await;
        }
    };

    match tokio::fs::read(&path).await {
        Ok(bytes) => png_response(bytes),
        Err(e) => {
            error!(path = %path.display(), error = %e, "Failed to read rendered preview image");
            fallback_image(&state.static_dir).await
        }
    }
}

/// Serves the static fallback image, or 404 if it is missing.
pub async fn fallback_image(static_dir: &Path) -> Response {
    let path = static_dir.join(FALLBACK_IMAGE);

    match tokio::fs::read(&path).await {
        Ok(bytes) => png_response(bytes),
        Err(e) => {
            error!(path = %path.display(), error = %e, "Fallback preview image missing");
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

fn png_response(bytes: Vec<u8>) -> Response {
    (
        [
            (header::CONTENT_TYPE, "image/png"),
            (header::CACHE_CONTROL, IMAGE_CACHE_CONTROL),
        ],
        bytes,
    )
        .into_response()
}
