//! HTTP request handlers for API endpoints.
//!
//! Each handler module corresponds to a logical grouping of endpoints.

pub mod health;
pub mod og_image;
pub mod redirect;
pub mod shortlink;
pub mod track;

pub use health::health_handler;
pub use og_image::og_image_handler;
pub use redirect::redirect_handler;
pub use shortlink::create_shortlink_handler;
pub use track::track_handler;
