mod common;

use axum::Router;
use axum::http::StatusCode;
use axum_test::TestServer;
use parabens::api::dto::shortlink::ShortlinkResponse;
use parabens::api::routes::shortlink_routes;
use serde_json::json;

fn app(ctx: &common::TestContext) -> TestServer {
    app_with(ctx, ctx.state.behind_proxy)
}

fn app_with(ctx: &common::TestContext, behind_proxy: bool) -> TestServer {
    let app = Router::new()
        .merge(shortlink_routes(behind_proxy))
        .layer(common::MockConnectInfoLayer)
        .with_state(ctx.state.clone());

    TestServer::new(app).unwrap()
}

#[tokio::test]
async fn test_create_shortlink_success() {
    let ctx = common::create_test_state();
    let server = app(&ctx);

    let response = server
        .post("/s")
        .json(&json!({ "path": "/aniversario/Ana_Maria?theme=warm" }))
        .await;

    response.assert_status(StatusCode::CREATED);

    let body = response.json::<ShortlinkResponse>();
    assert_eq!(body.code.len(), 7);
    assert!(body.code.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(body.short_url, format!("https://parabens.vc/s/{}", body.code));
    assert_eq!(body.path, "aniversario/Ana_Maria?theme=warm");
    assert_eq!(
        body.destination,
        "https://parabens.vc/aniversario/Ana_Maria?theme=warm"
    );
}

#[tokio::test]
async fn test_create_shortlink_is_idempotent() {
    let ctx = common::create_test_state();
    let server = app(&ctx);

    let first = server.post("/s").json(&json!({ "path": "Maria_Silva" })).await;
    first.assert_status(StatusCode::CREATED);
    let snapshot_after_first = std::fs::read(ctx.snapshot_path()).unwrap();

    let second = server.post("/s").json(&json!({ "path": "/Maria_Silva" })).await;
    second.assert_status_ok();

    let first = first.json::<ShortlinkResponse>();
    let second = second.json::<ShortlinkResponse>();
    assert_eq!(first.code, second.code);
    assert_eq!(
        std::fs::read(ctx.snapshot_path()).unwrap(),
        snapshot_after_first
    );
}

#[tokio::test]
async fn test_create_shortlink_persists_snapshot() {
    let ctx = common::create_test_state();
    let server = app(&ctx);

    let response = server.post("/s").json(&json!({ "path": "/Joana" })).await;
    let body = response.json::<ShortlinkResponse>();

    let stored: serde_json::Value =
        serde_json::from_slice(&std::fs::read(ctx.snapshot_path()).unwrap()).unwrap();
    assert_eq!(stored[&body.code], "/Joana");
}

#[tokio::test]
async fn test_create_shortlink_empty_message() {
    let ctx = common::create_test_state();
    let server = app(&ctx);

    for path in ["", "/", "   ", "/aniversario/"] {
        let response = server
            .post("/s")
            .json(&json!({ "path": path }))
            .await;

        response.assert_status_bad_request();
    }
}

#[tokio::test]
async fn test_create_shortlink_scanner_path() {
    let ctx = common::create_test_state();
    let server = app(&ctx);

    let response = server
        .post("/s")
        .json(&json!({ "path": "/wp-admin/setup-config.php" }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_create_shortlink_blocked_message() {
    let ctx = common::create_test_state();
    let server = app(&ctx);

    let response = server
        .post("/s")
        .json(&json!({ "path": "/Seu_Idiota" }))
        .await;

    response.assert_status(StatusCode::FORBIDDEN);
    assert!(!ctx.snapshot_path().exists());
}

#[tokio::test]
async fn test_create_shortlink_invalid_json() {
    let ctx = common::create_test_state();
    let server = app(&ctx);

    let response = server
        .post("/s")
        .content_type("application/json")
        .bytes("{\"path\":".into())
        .await;

    response.assert_status_bad_request();
    let json = response.json::<serde_json::Value>();
    assert_eq!(json["error"]["code"], "validation_error");
}

#[tokio::test]
async fn test_create_shortlink_path_too_long() {
    let ctx = common::create_test_state();
    let server = app(&ctx);

    let response = server
        .post("/s")
        .json(&json!({ "path": format!("/{}", "a".repeat(600)) }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_create_shortlink_body_too_large() {
    let ctx = common::create_test_state();
    let server = app(&ctx);

    let response = server
        .post("/s")
        .json(&json!({ "path": "x".repeat(9 * 1024) }))
        .await;

    response.assert_status(StatusCode::PAYLOAD_TOO_LARGE);
}

#[tokio::test]
async fn test_create_shortlink_rate_limited_behind_proxy() {
    let ctx = common::create_test_state();
    let server = app_with(&ctx, true);

    for _ in 0..20 {
        server
            .post("/s")
            .add_header("x-forwarded-for", "203.0.113.7")
            .json(&json!({ "path": "/Ana" }))
            .await
            .assert_status_success();
    }

    let response = server
        .post("/s")
        .add_header("x-forwarded-for", "203.0.113.7")
        .json(&json!({ "path": "/Ana" }))
        .await;

    response.assert_status(StatusCode::TOO_MANY_REQUESTS);

    server
        .post("/s")
        .add_header("x-forwarded-for", "203.0.113.8")
        .json(&json!({ "path": "/Ana" }))
        .await
        .assert_status_ok();
}

#[tokio::test]
async fn test_forwarded_for_ignored_without_proxy() {
    let ctx = common::create_test_state();
    let server = app_with(&ctx, false);

    for i in 0..20 {
        server
            .post("/s")
            .add_header("x-forwarded-for", format!("203.0.113.{i}"))
            .json(&json!({ "path": "/Ana" }))
            .await
            .assert_status_success();
    }

    // Every request shares the peer address, whatever it claims.
    let response = server
        .post("/s")
        .add_header("x-forwarded-for", "198.51.100.1")
        .json(&json!({ "path": "/Ana" }))
        .await;

    response.assert_status(StatusCode::TOO_MANY_REQUESTS);
}

#[tokio::test]
async fn test_protocol_relative_path_rejected() {
    let ctx = common::create_test_state();
    let server = app(&ctx);

    for path in ["//evil.example/Joana", "/\\evil.example/Joana", "\\evil.example/Joana", "///evil.example"] {
        let response = server.post("/s").json(&json!({ "path": path })).await;

        response.assert_status_bad_request();
        let json = response.json::<serde_json::Value>();
        assert_eq!(json["error"]["code"], "validation_error");
    }

    assert!(ctx.state.shortlinks.entries().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_redirect_not_rate_limited() {
    let ctx = common::create_test_state();
    let server = app(&ctx);

    let created = server.post("/s").json(&json!({ "path": "/Ana" })).await;
    let code = created.json::<ShortlinkResponse>().code;

    for _ in 0..30 {
        server
            .get(&format!("/s/{code}"))
            .await
            .assert_status(StatusCode::FOUND);
    }
}
