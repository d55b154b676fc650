//! Handler for anonymous analytics events.

use std::net::SocketAddr;

use axum::{
    body::Bytes,
    extract::ConnectInfo,
    http::{HeaderMap, StatusCode, header},
};
use serde_json::json;
use tracing::info;

use crate::api::dto::track::TrackEvent;
use crate::error::AppError;
use crate::utils::client_ip::client_ip;

/// Records a page event in the `analytics` log target.
///
/// All ten event fields are logged as sent. Request headers are logged
/// alongside under `header_*` names.
///
/// # Endpoint
///
/// `POST /api/track`
///
/// The body is parsed as JSON whatever its `Content-Type`, since browsers send
/// beacons as `text/plain`.
///
/// # Response Codes
///
/// - **204 No Content**: Event logged
/// - **400 Bad Request**: Body is not a JSON event
/// - **413 Payload Too Large**: Body over 16 KiB
pub async fn track_handler(
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<StatusCode, AppError> {
    let event: TrackEvent = serde_json::from_slice(&body)
        .map_err(|e| AppError::bad_request("Invalid event", json!({ "reason": e.to_string() })))?;

    let header_str = |name: header::HeaderName| {
        headers
            .get(name)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string()
    };

    info!(
        target: "analytics",
        event = %event.event,
        path = %event.path,
        query = %event.query,
        referrer = %event.referrer,
        timezone = %event.timezone,
        screen = %event.screen,
        viewport = %event.viewport,
        user_agent = %event.user_agent,
        timestamp = %event.timestamp,
        accept_language = %event.accept_language,
        ip = %client_ip(&headers, Some(addr)),
        header_user_agent = %header_str(header::USER_AGENT),
        header_referer = %header_str(header::REFERER),
        header_accept_language = %header_str(header::ACCEPT_LANGUAGE),
        "track_event"
    );

    metrics::counter!("analytics_events_total").increment(1);

    Ok(StatusCode::NO_CONTENT)
}
