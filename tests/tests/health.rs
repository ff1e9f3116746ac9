//! Service info and health endpoint tests.

use axum_test::TestServer;
use integration_tests::fixtures;
use integration_tests::setup::TestContext;

#[tokio::test]
async fn root_reports_service_info() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router.clone()).unwrap();

    let response = server.get("/").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["service"], "External Link Click Monitor");
    assert_eq!(body["status"], "running");
    assert!(body["version"].as_str().is_some());
}

#[tokio::test]
async fn health_reports_component_status() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router.clone()).unwrap();

    let response = server.get("/health").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["audit_connected"], true);
    assert_eq!(body["artifacts_writable"], true);
    assert!(body["snapshots_created"].as_u64().is_some());
}

#[tokio::test]
async fn probes_answer_ok_when_components_are_healthy() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router.clone()).unwrap();

    server.get("/health/ready").await.assert_status_ok();
    server.get("/health/live").await.assert_status_ok();
}

#[tokio::test]
async fn snapshot_counter_is_visible_through_health() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router.clone()).unwrap();

    let before: serde_json::Value = server.get("/health").await.json();
    let before = before["snapshots_created"].as_u64().unwrap();

    server
        .post("/api/external-link-snapshot")
        .json(&fixtures::snapshot_body("https://intranet.example.com"))
        .await
        .assert_status_ok();

    let after: serde_json::Value = server.get("/health").await.json();
    let after = after["snapshots_created"].as_u64().unwrap();
    assert!(after > before, "capture must bump the created counter");
}
