//! Handler for health check endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::health::{CheckStatus, HealthChecks, HealthResponse};
use crate::state::AppState;

/// Returns service health status with component checks.
///
/// # Endpoint
///
/// `GET /health`
///
/// # Response Codes
///
/// - **200 OK**: All components healthy
/// - **503 Service Unavailable**: One or more components degraded
///
/// # Components Checked
///
/// 1. **Shortlinks**: Snapshot loads (this triggers the first load if needed)
/// 2. **Render Queue**: Worker is running
///
/// # Response
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "checks": {
///     "shortlinks": { "status": "ok", "message": "12 entries" },
///     "render_queue": { "status": "ok", "message": "Capacity: 32" }
///   }
/// }
/// ```
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<Json<HealthResponse>, (StatusCode, Json<HealthResponse>)> {
    let shortlinks = check_shortlinks(&state).await;
    let render_queue = check_render_queue(&state);

    let all_healthy = shortlinks.is_ok() && render_queue.is_ok();

    let response = HealthResponse {
        status: if all_healthy { "healthy" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        checks: HealthChecks {
            shortlinks,
            render_queue,
        },
    };

    if all_healthy {
        Ok(Json(response))
    } else {
        Err((StatusCode::SERVICE_UNAVAILABLE, Json(response)))
    }
}

async fn check_shortlinks(state: &AppState) -> CheckStatus {
    match state.shortlinks.ensure_loaded().await {
        Ok(()) => {
            let (entries, _) = state.shortlinks.index_sizes().await;
            CheckStatus::ok(format!("{entries} entries"))
        }
        Err(e) => CheckStatus::error(e.to_string()),
    }
}

fn check_render_queue(state: &AppState) -> CheckStatus {
    if state.render_queue.is_closed() {
        CheckStatus::error("Render queue is closed")
    } else {
        CheckStatus::ok(format!("Capacity: {}", state.render_queue.capacity()))
    }
}
