//! Public site route configuration.

use std::path::Path;

use axum::{Router, http::HeaderValue, http::header, routing::get};
use tower::Layer;
use tower_http::services::ServeFile;
use tower_http::set_header::{SetResponseHeader, SetResponseHeaderLayer};

use crate::state::AppState;
use crate::web::handlers::privacy_handler;

/// Cache policy for stylesheet and script, which change with deploys.
pub const ASSET_CACHE_CONTROL: &str = "public, max-age=300";

/// Cache policy for images.
pub const IMAGE_CACHE_CONTROL: &str = "public, max-age=86400";

/// HTML pages other than the greeting.
///
/// # Endpoints
///
/// - `GET /privacy` - Privacy notice
///
/// The greeting itself is the router fallback, see
/// [`crate::web::handlers::page_handler`].
pub fn page_routes() -> Router<AppState> {
    Router::new().route("/privacy", get(privacy_handler))
}

/// Static assets served from `static_dir`.
///
/// # Endpoints
///
/// - `GET /styles.css`, `/app.js` - cached for 5 minutes
/// - `GET /favicon.svg`, `/og-image.svg` - cached for a day
pub fn static_routes(static_dir: &Path) -> Router<AppState> {
    Router::new()
        .route_service(
            "/styles.css",
            cached(static_dir.join("styles.css"), ASSET_CACHE_CONTROL),
        )
        .route_service(
            "/app.js",
            cached(static_dir.join("app.js"), ASSET_CACHE_CONTROL),
        )
        .route_service(
            "/favicon.svg",
            cached(static_dir.join("favicon.svg"), IMAGE_CACHE_CONTROL),
        )
        .route_service(
            "/og-image.svg",
            cached(static_dir.join("og-image.svg"), IMAGE_CACHE_CONTROL),
        )
}

fn cached(path: impl AsRef<Path>, cache_control: &'static str) -> SetResponseHeader<ServeFile, HeaderValue> {
    SetResponseHeaderLayer::overriding(
        header::CACHE_CONTROL,
        HeaderValue::from_static(cache_control),
    )
    .layer(ServeFile::new(path))
}
