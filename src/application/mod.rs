//! Application layer services.
//!
//! Services coordinate domain types and repository traits, and give HTTP
//! handlers and the admin CLI a small API to work with.
//!
//! # Available Services
//!
//! - [`services::shortlink_store::ShortlinkStore`] - Durable, idempotent shortlink mapping
//! - [`services::render_queue::RenderQueue`] - Serialized preview image rendering

pub mod services;
