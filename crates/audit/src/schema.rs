//! Audit log schema.

use monitor_core::Result;
use tracing::debug;

use crate::client::{map_sqlx_error, AuditStore};

/// DDL for the capture event table.
///
/// `created_at` is stored as TEXT in `YYYY-MM-DD HH:MM:SS[.fff]` form, which
/// both sorts chronologically and works with SQLite's date functions. There
/// is no update or delete path anywhere in the service.
pub const CREATE_SNAPSHOT_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS external_link_snapshot (
    id              INTEGER PRIMARY KEY AUTOINCREMENT,
    origin_url      TEXT NOT NULL,
    click_type      TEXT NOT NULL,
    click_value     TEXT NOT NULL,
    page_url        TEXT,
    page_hash       TEXT,
    screenshot_path TEXT NOT NULL,
    created_at      TEXT NOT NULL
)
"#;

pub const CREATE_ORIGIN_INDEX: &str = r#"
CREATE INDEX IF NOT EXISTS idx_external_link_snapshot_origin
ON external_link_snapshot(origin_url)
"#;

pub const CREATE_CREATED_AT_INDEX: &str = r#"
CREATE INDEX IF NOT EXISTS idx_external_link_snapshot_created_at
ON external_link_snapshot(created_at)
"#;

/// All DDL statements in application order.
pub fn all_ddl() -> [&'static str; 3] {
    [
        CREATE_SNAPSHOT_TABLE,
        CREATE_ORIGIN_INDEX,
        CREATE_CREATED_AT_INDEX,
    ]
}

/// Create the table and indexes if they do not exist.
pub async fn init_schema(store: &AuditStore) -> Result<()> {
    for ddl in all_ddl() {
        sqlx::query(ddl)
            .execute(store.pool())
            .await
            .map_err(map_sqlx_error)?;
    }

    debug!("Audit schema initialized");
    Ok(())
}
