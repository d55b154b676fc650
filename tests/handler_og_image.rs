mod common;

use axum::{Router, routing::get};
use axum_test::TestServer;
use parabens::api::handlers::og_image_handler;
use parabens::utils::message::og_cache_key;

fn app(ctx: &common::TestContext) -> TestServer {
    let app = Router::new()
        .route("/og-image.png", get(og_image_handler))
        .with_state(ctx.state.clone());

    TestServer::new(app).unwrap()
}

fn cached_file(ctx: &common::TestContext, text: &str) -> std::path::PathBuf {
    ctx.cache_dir()
        .join("og")
        .join(format!("{}.png", og_cache_key(text)))
}

#[tokio::test]
async fn test_empty_text_serves_fallback() {
    let ctx = common::create_test_state();
    let server = app(&ctx);

    let response = server.get("/og-image.png").await;

    response.assert_status_ok();
    assert_eq!(response.header("content-type"), "image/png");
    assert_eq!(response.as_bytes().as_ref(), common::FALLBACK_PNG);
    assert_eq!(ctx.renderer.calls(), 0);
}

#[tokio::test]
async fn test_text_is_rendered_and_cached() {
    let ctx = common::create_test_state();
    let server = app(&ctx);

    let response = server
        .get("/og-image.png")
        .add_query_param("text", "Feliz Aniversário, Ana Maria")
        .await;

    response.assert_status_ok();
    assert_eq!(response.header("content-type"), "image/png");
    assert_eq!(response.header("cache-control"), "public, max-age=86400");
    assert_eq!(response.as_bytes().as_ref(), common::RENDERED_PNG);
    assert!(cached_file(&ctx, "Feliz Aniversário, Ana Maria").is_file());
    assert_eq!(ctx.renderer.calls(), 1);
}

#[tokio::test]
async fn test_cache_hit_skips_renderer() {
    let ctx = common::create_test_state();
    let server = app(&ctx);

    for _ in 0..3 {
        server
            .get("/og-image.png")
            .add_query_param("text", "Carlos")
            .await
            .assert_status_ok();
    }

    assert_eq!(ctx.renderer.calls(), 1);
}

#[tokio::test]
async fn test_render_failure_serves_fallback() {
    let ctx = common::create_test_state_with(common::FakeRenderer::failing());
    let server = app(&ctx);

    let response = server
        .get("/og-image.png")
        .add_query_param("text", "Carlos")
        .await;

    response.assert_status_ok();
    assert_eq!(response.as_bytes().as_ref(), common::FALLBACK_PNG);
    assert!(!cached_file(&ctx, "Carlos").exists());
}

#[tokio::test]
async fn test_blocked_and_scanner_text_serve_fallback() {
    let ctx = common::create_test_state();
    let server = app(&ctx);

    for text in ["Seu Idiota", "wp-login.php", "../etc/passwd"] {
        let response = server
            .get("/og-image.png")
            .add_query_param("text", text)
            .await;

        response.assert_status_ok();
        assert_eq!(response.as_bytes().as_ref(), common::FALLBACK_PNG);
    }

    assert_eq!(ctx.renderer.calls(), 0);
}

#[tokio::test]
async fn test_missing_fallback_is_not_found() {
    let ctx = common::create_test_state();
    std::fs::remove_file(ctx.state.static_dir.join("og-image.png")).unwrap();
    let server = app(&ctx);

    let response = server.get("/og-image.png").await;

    response.assert_status_not_found();
}
