//! API route configuration.
//!
//! Write endpoints are rate limited per client via
//! [`crate::api::middleware::rate_limit`] and have small body limits.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::api::handlers::{
    create_shortlink_handler, health_handler, og_image_handler, redirect_handler, track_handler,
};
use crate::api::middleware::rate_limit;
use crate::state::AppState;

/// Maximum body size for shortlink creation.
pub const SHORTLINK_BODY_LIMIT: usize = 8 * 1024;

/// Maximum body size for analytics events.
pub const TRACK_BODY_LIMIT: usize = 16 * 1024;

/// Shortlink creation and redirect.
///
/// # Endpoints
///
/// - `POST /s`        - Create a shortlink (20/min per client, 8 KiB body)
/// - `GET  /s/{code}` - Redirect to the stored greeting path
///
/// `behind_proxy` selects whether clients are keyed by forwarding headers or
/// by the socket peer.
pub fn shortlink_routes(behind_proxy: bool) -> Router<AppState> {
    let create = Router::new()
        .route("/s", post(create_shortlink_handler))
        .layer(DefaultBodyLimit::max(SHORTLINK_BODY_LIMIT));

    rate_limit::limit(create, rate_limit::SHORTLINK_PER_MINUTE, behind_proxy)
        .route("/s/{code}", get(redirect_handler))
}

/// Analytics intake.
///
/// # Endpoints
///
/// - `POST /api/track` - Log a page event (120/min per client, 16 KiB body)
pub fn track_routes(behind_proxy: bool) -> Router<AppState> {
    let track = Router::new()
        .route("/api/track", post(track_handler))
        .layer(DefaultBodyLimit::max(TRACK_BODY_LIMIT));

    rate_limit::limit(track, rate_limit::TRACK_PER_MINUTE, behind_proxy)
}

/// Unthrottled read endpoints.
///
/// # Endpoints
///
/// - `GET /og-image.png` - Personalized preview image
/// - `GET /health`       - Component health
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/og-image.png", get(og_image_handler))
        .route("/health", get(health_handler))
}
