//! Audit row inserts.

use chrono::{NaiveDateTime, Utc};
use monitor_core::{NewSnapshot, Result};
use tracing::debug;

use crate::client::{map_sqlx_error, AuditStore};

const INSERT_SQL: &str = r#"
INSERT INTO external_link_snapshot
    (origin_url, click_type, click_value, page_url, page_hash, screenshot_path, created_at)
VALUES (?, ?, ?, ?, ?, ?, ?)
RETURNING id
"#;

/// Insert one capture event, assigning `created_at` now.
///
/// Only the capture pipeline calls this, and only after the screenshot
/// artifact is durably stored; the artifact-then-record ordering is what
/// keeps `screenshot_path` from ever dangling.
pub async fn insert_snapshot(store: &AuditStore, snapshot: &NewSnapshot) -> Result<i64> {
    insert_snapshot_at(store, snapshot, Utc::now().naive_utc()).await
}

/// Insert with an explicit `created_at`.
///
/// Exists so test fixtures and backfills can seed historical rows; the
/// service itself always goes through [`insert_snapshot`].
pub async fn insert_snapshot_at(
    store: &AuditStore,
    snapshot: &NewSnapshot,
    created_at: NaiveDateTime,
) -> Result<i64> {
    let row: (i64,) = sqlx::query_as(INSERT_SQL)
        .bind(&snapshot.origin_url)
        .bind(snapshot.click_type.as_str())
        .bind(&snapshot.click_value)
        .bind(&snapshot.page_url)
        .bind(&snapshot.page_hash)
        .bind(&snapshot.screenshot_path)
        .bind(created_at)
        .fetch_one(store.pool())
        .await
        .map_err(map_sqlx_error)?;

    debug!(id = row.0, origin_url = %snapshot.origin_url, "Audit row inserted");
    Ok(row.0)
}
