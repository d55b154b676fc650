//! # Parabéns
//!
//! A festive greeting server: every path is a personalized congratulations page,
//! with shortlinks for sharing and cached social-preview images.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Entities, the render job protocol and repository traits
//! - **Application Layer** ([`application`]) - Shortlink store and render queue
//! - **Infrastructure Layer** ([`infrastructure`]) - JSON snapshot file and `rsvg-convert` renderer
//! - **API Layer** ([`api`]) - Shortlink, analytics, preview image and health endpoints
//! - **Web Layer** ([`web`]) - Greeting page, privacy page and static assets
//!
//! ## Features
//!
//! - Occasion-aware greeting pages with Open Graph tags
//! - Idempotent 7-character shortlinks persisted to a JSON snapshot
//! - Preview images rendered one at a time and cached on disk
//! - Blocked-term and scanner-path filtering
//! - Rate limiting, security headers and structured analytics logging
//!
//! ## Quick Start
//!
//! ```bash
//! export PUBLIC_BASE_URL="http://localhost:8080"   # Optional
//! export SHORTLINK_DB="data/shortlinks.json"       # Optional
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;
pub mod web;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::application::services::{RenderQueue, ShortlinkError, ShortlinkStore};
    pub use crate::domain::entities::{Occasion, Shortlink};
    pub use crate::domain::render_cache::RenderCache;
    pub use crate::domain::repositories::{ImageRenderer, RenderError};
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
