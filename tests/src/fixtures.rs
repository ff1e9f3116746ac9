//! Request payloads and audit row seeding helpers.

use audit_store::AuditStore;
use chrono::NaiveDateTime;
use monitor_core::{ClickType, NewSnapshot};

/// Valid snapshot creation request body.
pub fn snapshot_body(origin_url: &str) -> serde_json::Value {
    serde_json::json!({
        "origin_url": origin_url,
        "click_type": "text",
        "click_value": "Download now",
        "wait_after_click_ms": 0,
        "full_page": true
    })
}

/// Parse a fixture timestamp, `YYYY-MM-DDTHH:MM:SS`.
pub fn ts(s: &str) -> NaiveDateTime {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S").expect("bad fixture timestamp")
}

/// Seed one historical audit row with an explicit `created_at`.
pub async fn seed_row(store: &AuditStore, origin: &str, page_hash: Option<&str>, at: NaiveDateTime) {
    audit_store::insert_snapshot_at(
        store,
        &NewSnapshot {
            origin_url: origin.into(),
            click_type: ClickType::Text,
            click_value: "Download".into(),
            page_url: Some("https://landing.example.com".into()),
            page_hash: page_hash.map(Into::into),
            screenshot_path: "/tmp/seeded.png".into(),
        },
        at,
    )
    .await
    .expect("Failed to seed audit row");
}
