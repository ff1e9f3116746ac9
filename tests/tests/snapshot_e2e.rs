//! End-to-end tests for the capture pipeline.
//!
//! POST /api/external-link-snapshot → MockRenderClient → ArtifactStore →
//! AuditStore, using the real router and real stores on a tempdir. Only the
//! render collaborator's network transport is mocked.

use axum::http::StatusCode;
use axum_test::TestServer;
use integration_tests::fixtures;
use integration_tests::mocks::MockRenderMode;
use integration_tests::setup::TestContext;
use monitor_core::{ClickType, CreateSnapshotRequest};

#[tokio::test]
async fn successful_capture_writes_artifact_then_row() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    ctx.render.set_screenshot(b"png payload bytes".to_vec());

    let response = server
        .post("/api/external-link-snapshot")
        .json(&fixtures::snapshot_body("https://intranet.example.com/news"))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "ok");
    let snapshot_id = body["snapshot_id"].as_i64().expect("missing snapshot_id");
    assert!(snapshot_id > 0);

    // The render collaborator saw the click exactly once, with our locator.
    assert_eq!(ctx.render.call_count(), 1);
    let call = &ctx.render.calls()[0];
    assert_eq!(call.url, "https://intranet.example.com/news");
    assert_eq!(call.click.kind, ClickType::Text);
    assert_eq!(call.click.value, "Download now");

    // The row exists and its artifact is on disk with the exact payload.
    let today = chrono::Utc::now().date_naive();
    let rows = audit_store::events_by_day(&ctx.audit, today).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].id, snapshot_id);
    assert_eq!(rows[0].page_url.as_deref(), Some("https://landing.example.com/page"));
    assert_eq!(rows[0].page_hash.as_deref(), Some("deadbeefcafe"));
    assert!(ctx.artifacts.screenshot_exists(&rows[0].screenshot_path).await);

    let written = tokio::fs::read(&rows[0].screenshot_path).await.unwrap();
    assert_eq!(written.len(), ctx.render.screenshot_len());
}

#[tokio::test]
async fn capture_records_partial_render_outcome() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    // The collaborator succeeded but could not determine URL or hash;
    // that is a normal outcome and still worth a row.
    ctx.render.set_page(None, None);

    let response = server
        .post("/api/external-link-snapshot")
        .json(&fixtures::snapshot_body("https://intranet.example.com"))
        .await;
    response.assert_status_ok();

    let today = chrono::Utc::now().date_naive();
    let rows = audit_store::events_by_day(&ctx.audit, today).await.unwrap();
    assert_eq!(rows.len(), 1);
    assert!(rows[0].page_url.is_none());
    assert!(rows[0].page_hash.is_none());
    assert!(!rows[0].screenshot_path.is_empty());
}

#[tokio::test]
async fn render_service_failure_creates_nothing() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    ctx.render
        .set_mode(MockRenderMode::ServiceFailure("click target not found".into()));

    let response = server
        .post("/api/external-link-snapshot")
        .json(&fixtures::snapshot_body("https://intranet.example.com"))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "RENDER_004");
    assert!(body["error"].as_str().unwrap().contains("click target not found"));

    assert_eq!(ctx.snapshot_count().await, 0);
    assert_eq!(ctx.artifact_count().await, 0);
}

#[tokio::test]
async fn render_timeout_creates_nothing() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    ctx.render.set_mode(MockRenderMode::Timeout);

    let response = server
        .post("/api/external-link-snapshot")
        .json(&fixtures::snapshot_body("https://intranet.example.com"))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "RENDER_001");

    assert_eq!(ctx.snapshot_count().await, 0);
    assert_eq!(ctx.artifact_count().await, 0);
}

#[tokio::test]
async fn render_transport_error_creates_nothing() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    ctx.render
        .set_mode(MockRenderMode::TransportError("connection refused".into()));

    let response = server
        .post("/api/external-link-snapshot")
        .json(&fixtures::snapshot_body("https://intranet.example.com"))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "RENDER_002");
    assert!(body["error"].as_str().unwrap().contains("connection refused"));

    assert_eq!(ctx.snapshot_count().await, 0);
    assert_eq!(ctx.artifact_count().await, 0);
}

#[tokio::test]
async fn artifact_decode_failure_leaves_no_row() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    ctx.render.set_mode(MockRenderMode::CorruptScreenshot);

    let response = server
        .post("/api/external-link-snapshot")
        .json(&fixtures::snapshot_body("https://intranet.example.com"))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "STORE_001");

    // The render result from step 1 must not leak into storage.
    assert_eq!(ctx.snapshot_count().await, 0);
    assert_eq!(ctx.artifact_count().await, 0);
}

#[tokio::test]
async fn empty_origin_url_is_rejected_before_any_work() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let mut body = fixtures::snapshot_body("");
    body["origin_url"] = serde_json::json!("   ");

    let response = server.post("/api/external-link-snapshot").json(&body).await;
    response.assert_status(StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json();
    assert_eq!(body["code"], "VALID_001");

    assert_eq!(ctx.render.call_count(), 0);
    assert_eq!(ctx.snapshot_count().await, 0);
}

#[tokio::test]
async fn unknown_click_type_is_rejected_by_schema() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router.clone()).expect("Failed to create test server");

    let mut body = fixtures::snapshot_body("https://intranet.example.com");
    body["click_type"] = serde_json::json!("selector");

    let response = server.post("/api/external-link-snapshot").json(&body).await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(ctx.render.call_count(), 0);
}

#[tokio::test]
async fn concurrent_captures_produce_independent_rows_and_artifacts() {
    let ctx = TestContext::new().await;
    let n = 8usize;
    ctx.render.set_screenshot(b"concurrent payload".to_vec());

    let mut tasks = tokio::task::JoinSet::new();
    for i in 0..n {
        let pipeline = ctx.pipeline.clone();
        tasks.spawn(async move {
            pipeline
                .create_snapshot(&CreateSnapshotRequest {
                    origin_url: format!("https://origin-{i}.example.com"),
                    click_type: ClickType::Css,
                    click_value: "#external".into(),
                    wait_after_click_ms: 0,
                    full_page: true,
                })
                .await
        });
    }

    let mut ids = Vec::new();
    while let Some(result) = tasks.join_next().await {
        ids.push(result.expect("task panicked").expect("capture failed"));
    }

    ids.sort_unstable();
    ids.dedup();
    assert_eq!(ids.len(), n, "every capture must get a distinct id");

    assert_eq!(ctx.snapshot_count().await as usize, n);
    assert_eq!(ctx.artifact_count().await, n);

    // No interleaving corruption: every artifact holds the full payload.
    let today = chrono::Utc::now().date_naive();
    let rows = audit_store::events_by_day(&ctx.audit, today).await.unwrap();
    assert_eq!(rows.len(), n);
    for row in rows {
        let bytes = tokio::fs::read(&row.screenshot_path).await.unwrap();
        assert_eq!(bytes.len(), ctx.render.screenshot_len());
    }
}
