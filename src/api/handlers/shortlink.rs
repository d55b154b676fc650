//! Handler for shortlink creation.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::shortlink::{ShortlinkRequest, ShortlinkResponse};
use crate::domain::entities::parse_occasion_from_path;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::blocklist::is_blocked_message;
use crate::utils::message::decode_path;
use crate::utils::path_guard::{is_off_site, looks_like_path};

/// Creates (or returns the existing) shortlink for a greeting path.
///
/// # Endpoint
///
/// `POST /s`
///
/// # Request Body
///
/// ```json
/// { "path": "/aniversario/Ana_Maria?theme=warm" }
/// ```
///
/// The path is stored with a leading `/`, occasion segment and query string
/// included. The same path always yields the same code.
///
/// # Response
///
/// ```json
/// {
///   "code": "aB3dE9z",
///   "short_url": "https://parabens.vc/s/aB3dE9z",
///   "path": "aniversario/Ana_Maria?theme=warm",
///   "destination": "https://parabens.vc/aniversario/Ana_Maria?theme=warm"
/// }
/// ```
///
/// # Response Codes
///
/// - **201 Created**: New code minted
/// - **200 OK**: Path already had a code
/// - **400 Bad Request**: Malformed body, a path starting with `//` or `/\`,
///   or a path that carries no usable message
/// - **403 Forbidden**: Message contains a blocked term
/// - **413 Payload Too Large**: Body over 8 KiB
/// - **500 Internal Server Error**: Store could not be loaded or saved
/// - **503 Service Unavailable**: No free code found, retry later
pub async fn create_shortlink_handler(
    State(state): State<AppState>,
    payload: Result<Json<ShortlinkRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ShortlinkResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let trimmed = payload.path.trim();
    let full_path = if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{trimmed}")
    };

    check_message(&full_path)?;

    let link = state.shortlinks.get_or_create(&full_path).await?;

    let status = if link.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };

    Ok((
        status,
        Json(ShortlinkResponse::new(
            &state.public_base_url,
            link.code,
            &link.path,
        )),
    ))
}

/// Rejects off-site paths, scanner paths, and messages that are empty or blocked.
fn check_message(full_path: &str) -> Result<(), AppError> {
    if is_off_site(full_path) {
        return Err(AppError::bad_request(
            "Path must stay on this site",
            json!({ "path": full_path }),
        ));
    }

    let path_only = full_path
        .split_once('?')
        .map_or(full_path, |(path, _)| path);

    let (_, raw_message) = parse_occasion_from_path(path_only);
    let message = decode_path(raw_message);

    if message.is_empty() {
        return Err(AppError::bad_request(
            "Path carries no message",
            json!({ "path": full_path }),
        ));
    }

    if looks_like_path(&message) {
        return Err(AppError::bad_request(
            "Message is not a greeting",
            json!({ "path": full_path }),
        ));
    }

    if is_blocked_message(&message) {
        return Err(AppError::forbidden(
            "This message is not available",
            json!({}),
        ));
    }

    Ok(())
}
