//! Handler for shortlink redirects.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::message::encode_path_segment;
use crate::utils::path_guard::is_off_site;

/// Redirects a short code to its greeting page.
///
/// # Endpoint
///
/// `GET /s/{code}`
///
/// # Response Codes
///
/// - **302 Found**: `Location` is the stored path
/// - **404 Not Found**: Unknown code, or a stored path pointing off-site
/// - **500 Internal Server Error**: Store could not be loaded
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let path = state.shortlinks.resolve(&code).await?;

    let location = redirect_location(&path)
        .ok_or_else(|| AppError::not_found("Shortlink not found", json!({ "code": code })))?;

    debug!(code = %code, location = %location, "Shortlink resolved");

    Ok((StatusCode::FOUND, [(header::LOCATION, location)]).into_response())
}

/// Builds the `Location` for a stored path.
///
/// Paths starting with `/` carry the occasion and query already and are used
/// as stored. Older entries hold a bare message, which is encoded into a path
/// segment. Bytes that are not visible ASCII are percent-encoded. Paths that
/// would leave the site yield `None`.
fn redirect_location(stored: &str) -> Option<String> {
    let path = if stored.starts_with('/') {
        if is_off_site(stored) {
            return None;
        }
        stored.to_string()
    } else {
        let encoded = encode_path_segment(stored);
        if encoded.is_empty() {
            return None;
        }
        format!("/{encoded}")
    };

    Some(escape_non_visible(&path))
}

fn escape_non_visible(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for byte in value.bytes() {
        if byte.is_ascii_graphic() {
            escaped.push(byte as char);
        } else {
            escaped.push_str(&format!("%{byte:02X}"));
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stored_paths_used_verbatim() {
        assert_eq!(
            redirect_location("/aniversario/Ana_Maria?theme=warm").as_deref(),
            Some("/aniversario/Ana_Maria?theme=warm")
        );
        assert_eq!(
            redirect_location("/Jo%C3%A3o").as_deref(),
            Some("/Jo%C3%A3o")
        );
    }

    #[test]
    fn test_legacy_bare_messages_encoded() {
        assert_eq!(
            redirect_location("Maria Silva").as_deref(),
            Some("/Maria_Silva")
        );
        assert_eq!(redirect_location("João").as_deref(), Some("/Jo%C3%A3o"));
        assert_eq!(redirect_location("   "), None);
    }

    #[test]
    fn test_off_site_paths_refused() {
        assert_eq!(redirect_location("//evil.example/Joana"), None);
        assert_eq!(redirect_location("/\\evil.example/Joana"), None);
        assert_eq!(
            redirect_location("/Joana?next=//evil.example").as_deref(),
            Some("/Joana?next=//evil.example")
        );
    }

    #[test]
    fn test_raw_unicode_is_escaped() {
        assert_eq!(
            redirect_location("/João Paulo").as_deref(),
            Some("/Jo%C3%A3o%20Paulo")
        );
    }
}
