//! Top-level router configuration combining API and web routes.
//!
//! # Route Structure
//!
//! - `POST /s`, `GET /s/{code}` - Shortlinks (creation rate limited)
//! - `POST /api/track`          - Analytics events (rate limited)
//! - `GET  /og-image.png`       - Personalized preview image
//! - `GET  /health`             - Health check: shortlink store, render queue
//! - `GET  /privacy`            - Privacy notice
//! - static assets              - `/styles.css`, `/app.js`, `/favicon.svg`, `/og-image.svg`
//! - everything else            - Greeting page
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Security headers** - CSP, `nosniff`, `no-referrer`, HSTS over HTTPS
//! - **Rate limiting** - Per-client token bucket on write endpoints
//! - **Path normalization** - Trailing slash handling

use axum::{Router, middleware};
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

use crate::api;
use crate::api::middleware::{security_headers, tracing};
use crate::state::AppState;
use crate::web;
use crate::web::handlers::page_handler;

/// Constructs the application router with all routes and middleware.
///
/// Static assets are served from `state.static_dir`.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let static_dir = state.static_dir.clone();
    let behind_proxy = state.behind_proxy;

    let router = Router::new()
        .merge(api::routes::shortlink_routes(behind_proxy))
        .merge(api::routes::track_routes(behind_proxy))
        .merge(api::routes::public_routes())
        .merge(web::routes::page_routes())
        .merge(web::routes::static_routes(&static_dir))
        .fallback(page_handler)
        .with_state(state)
        .layer(middleware::from_fn(security_headers::layer))
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
