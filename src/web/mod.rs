//! Public site layer: the greeting page, static pages and assets.
//!
//! Uses Askama templates for server-side rendering.
//!
//! # Modules
//!
//! - [`handlers`] - Template rendering handlers
//! - [`routes`] - Page and asset route configuration

pub mod handlers;
pub mod routes;
