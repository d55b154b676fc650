//! Business logic services for the application layer.

pub mod render_queue;
pub mod shortlink_store;

pub use render_queue::RenderQueue;
pub use shortlink_store::{MAX_CODE_ATTEMPTS, ShortlinkError, ShortlinkStore};
