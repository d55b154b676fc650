//! Storage and backend trait definitions for the domain layer.
//!
//! These traits abstract the two external resources the core depends on,
//! following the Repository pattern. Concrete implementations live in
//! `crate::infrastructure`.
//!
//! # Available Traits
//!
//! - [`SnapshotRepository`] - Durable shortlink snapshot
//! - [`ImageRenderer`] - Social-preview image rendering backend
//!
//! Mock implementations are auto-generated via `mockall` for unit tests.

pub mod image_renderer;
pub mod snapshot_repository;

pub use image_renderer::{ImageRenderer, RenderError};
pub use snapshot_repository::{Snapshot, SnapshotError, SnapshotRepository};

#[cfg(test)]
pub use image_renderer::MockImageRenderer;
#[cfg(test)]
pub use snapshot_repository::MockSnapshotRepository;
