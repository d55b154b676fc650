mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use parabens::api::handlers::health_handler;

#[tokio::test]
async fn test_health_endpoint_success() {
    let ctx = common::create_test_state();
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(ctx.state.clone());

    let server = TestServer::new(app).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["checks"]["shortlinks"]["status"], "ok");
    assert_eq!(json["checks"]["shortlinks"]["message"], "0 entries");
    assert_eq!(json["checks"]["render_queue"]["status"], "ok");
}

#[tokio::test]
async fn test_health_endpoint_structure() {
    let ctx = common::create_test_state();
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(ctx.state.clone());

    let server = TestServer::new(app).unwrap();

    let response = server.get("/health").await;

    let json = response.json::<serde_json::Value>();

    assert!(json.get("status").is_some());
    assert!(json.get("version").is_some());
    assert!(json.get("checks").is_some());
    assert!(json["checks"].get("shortlinks").is_some());
    assert!(json["checks"].get("render_queue").is_some());
}

#[tokio::test]
async fn test_health_degraded_when_snapshot_is_malformed() {
    let ctx = common::create_test_state();
    let path = ctx.snapshot_path();
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, b"[1, 2, 3]").unwrap();

    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(ctx.state.clone());

    let server = TestServer::new(app).unwrap();

    let response = server.get("/health").await;

    response.assert_status(axum::http::StatusCode::SERVICE_UNAVAILABLE);
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["status"], "degraded");
    assert_eq!(json["checks"]["shortlinks"]["status"], "error");
    assert_eq!(json["checks"]["render_queue"]["status"], "ok");
}
