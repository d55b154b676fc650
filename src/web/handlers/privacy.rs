//! Privacy notice page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::response::IntoResponse;

/// Template for the privacy notice.
///
/// Renders `templates/privacy.html`.
#[derive(Template, WebTemplate)]
#[template(path = "privacy.html")]
pub struct PrivacyTemplate {}

/// Renders the privacy notice.
///
/// # Endpoint
///
/// `GET /privacy`
pub async fn privacy_handler() -> impl IntoResponse {
    PrivacyTemplate {}
}
