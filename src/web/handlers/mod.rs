//! HTML template rendering handlers for the public site.

mod page;
mod privacy;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

pub use page::{IndexTemplate, page_handler};
pub use privacy::privacy_handler;

/// Template for HTML error pages.
#[derive(Template, WebTemplate)]
#[template(path = "error.html")]
pub struct ErrorTemplate<'a> {
    pub message: &'a str,
}

/// Renders an HTML error page with `status`.
pub fn error_page(status: StatusCode, message: &str) -> Response {
    (status, ErrorTemplate { message }).into_response()
}
