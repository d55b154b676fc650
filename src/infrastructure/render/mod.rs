//! Preview image renderer implementations.
//!
//! - [`RsvgRenderer`] - Pipes an SVG card through `rsvg-convert`

pub mod rsvg_renderer;

pub use rsvg_renderer::{OG_IMAGE_HEIGHT, OG_IMAGE_WIDTH, RsvgRenderer};
