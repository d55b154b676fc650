//! Greeting page handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    extract::State,
    http::{HeaderValue, Method, StatusCode, Uri, header},
    response::{IntoResponse, Response},
};
use tracing::debug;
use url::form_urlencoded;

use crate::api::dto::shortlink::MAX_PATH_LEN;
use crate::domain::entities::{Occasion, parse_occasion_from_path};
use crate::state::AppState;
use crate::utils::blocklist::is_blocked_message;
use crate::utils::message::{
    build_display_message, decode_path, has_encoded_final_punctuation, has_final_punctuation,
    og_image_url, theme_class,
};
use crate::utils::path_guard::looks_like_path;
use crate::web::handlers::error_page;

const PAGE_CACHE_CONTROL: &str = "public, max-age=300";

/// Template for the greeting page.
///
/// Renders `templates/index.html`. All fields are HTML-escaped by askama.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub title: String,
    pub description: String,
    pub og_url: String,
    pub og_image: String,
    pub greeting: String,
    pub message: String,
    pub punct: &'static str,
    pub subtitle: String,
    pub theme_class: Option<&'static str>,
    pub show_composer: bool,
}

impl IndexTemplate {
    /// Builds the page for a request path such as `/aniversario/Ana_Maria`.
    ///
    /// `path` is the raw, still percent-encoded request path.
    pub fn for_path(base_url: &str, path: &str, theme: &str) -> Self {
        let (occasion, raw_message) = parse_occasion_from_path(path);
        let message = decode_path(raw_message);
        Self::build(base_url, path, theme, occasion, raw_message, &message)
    }

    fn build(
        base_url: &str,
        path: &str,
        theme: &str,
        occasion: Occasion,
        raw_message: &str,
        message: &str,
    ) -> Self {
        let display = build_display_message(message);
        let punct = if has_final_punctuation(message) || has_encoded_final_punctuation(raw_message)
        {
            ""
        } else {
            "!"
        };

        let title = format!("{}, {display}{punct}", occasion.greeting);
        let subtitle = format!("{} {}", occasion.subtitle, occasion.emoji);

        let base = base_url.trim_end_matches('/');
        let og_url = if path.is_empty() || path == "/" {
            base.to_string()
        } else {
            format!("{base}{path}")
        };

        let og_text = if !message.is_empty() && !occasion.is_default() {
            format!("{}, {message}", occasion.greeting)
        } else {
            message.to_string()
        };

        Self {
            description: subtitle.clone(),
            og_url,
            og_image: og_image_url(base, &og_text),
            greeting: occasion.greeting.to_string(),
            message: display,
            punct,
            subtitle,
            theme_class: theme_class(theme),
            show_composer: message.is_empty(),
            title,
        }
    }
}

/// Renders the greeting for any path not claimed by another route.
///
/// # Endpoint
///
/// `GET|HEAD /{occasion?}/{message}`
///
/// # Response Codes
///
/// - **200 OK**: Greeting page, `?theme=` selects the color theme
/// - **403 Forbidden**: Message contains a blocked term
/// - **404 Not Found**: Message looks like a file path or URL
/// - **405 Method Not Allowed**: Anything but GET and HEAD
/// - **414 URI Too Long**: Path longer than 512 bytes
pub async fn page_handler(State(state): State<AppState>, method: Method, uri: Uri) -> Response {
    let path = uri.path();

    if path.len() > MAX_PATH_LEN {
        return error_page(
            StatusCode::URI_TOO_LONG,
            "A mensagem é muito longa. Encurte o texto e tente novamente.",
        );
    }

    if method != Method::GET && method != Method::HEAD {
        return (
            StatusCode::METHOD_NOT_ALLOWED,
            [(header::ALLOW, HeaderValue::from_static("GET, HEAD"))],
        )
            .into_response();
    }

    let (occasion, raw_message) = parse_occasion_from_path(path);
    let message = decode_path(raw_message);

    if looks_like_path(&message) {
        debug!(path = %path, "Rejected scanner path");
        return StatusCode::NOT_FOUND.into_response();
    }

    if is_blocked_message(&message) {
        return error_page(StatusCode::FORBIDDEN, "Esta mensagem não está disponível.");
    }

    let theme = uri
        .query()
        .and_then(|query| {
            form_urlencoded::parse(query.as_bytes())
                .find(|(key, _)| key == "theme")
                .map(|(_, value)| value.into_owned())
        })
        .unwrap_or_default();

    let page = IndexTemplate::build(
        &state.public_base_url,
        path,
        &theme,
        occasion,
        raw_message,
        &message,
    );

    (
        [(header::CACHE_CONTROL, HeaderValue::from_static(PAGE_CACHE_CONTROL))],
        page,
    )
        .into_response()
}
