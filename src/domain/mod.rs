//! Domain layer containing business entities and logic.
//!
//! Nothing here depends on the HTTP layer or on a concrete storage backend.
//!
//! # Architecture
//!
//! - [`entities`] - Occasions and shortlinks
//! - [`repositories`] - Snapshot persistence and image renderer traits
//! - [`render_cache`] - On-disk layout of rendered preview images
//! - [`render_job`] - Render job model
//! - [`render_worker`] - Single background worker that renders jobs in order
//!
//! # Render Flow
//!
//! 1. A handler asks [`crate::application::services::RenderQueue`] for an image
//! 2. On a cache miss a [`render_job::RenderJob`] is queued
//! 3. [`render_worker::run_render_worker`] renders it through an [`repositories::ImageRenderer`]
//! 4. The finished file is renamed into [`render_cache::RenderCache`] and the handler is woken

pub mod entities;
pub mod render_cache;
pub mod render_job;
pub mod render_worker;
pub mod repositories;
