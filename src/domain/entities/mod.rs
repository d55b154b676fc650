//! Core business entities.

pub mod occasion;
pub mod shortlink;

pub use occasion::{DEFAULT_OCCASION, OCCASIONS, Occasion, parse_occasion_from_path};
pub use shortlink::Shortlink;
