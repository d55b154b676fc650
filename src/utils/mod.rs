//! Utility functions for code generation, message text handling and request inspection.
//!
//! - [`code_generator`] - Short code generation
//! - [`message`] - Path decoding, display text and preview image helpers
//! - [`blocklist`] - Offensive-term filter
//! - [`path_guard`] - Scanner path and off-site path detection
//! - [`client_ip`] - Client address from forwarding headers

pub mod blocklist;
pub mod client_ip;
pub mod code_generator;
pub mod message;
pub mod path_guard;
