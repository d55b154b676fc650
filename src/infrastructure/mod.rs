//! Infrastructure layer for external integrations.
//!
//! This layer implements the traits defined by the domain layer.
//!
//! # Modules
//!
//! - [`persistence`] - JSON file snapshot storage
//! - [`render`] - `rsvg-convert` preview image renderer

pub mod persistence;
pub mod render;
