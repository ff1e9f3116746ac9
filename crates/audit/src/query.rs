//! Read-side query surface over the audit log.
//!
//! Every query is read-only and returns rows in a documented order. Day and
//! month windows are half-open `[start, end)`; the explicit range query is
//! inclusive on both ends. Callers rely on that asymmetry to avoid
//! double-counting boundary rows, so it must not drift.

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use monitor_core::{ClickType, PersistenceError, Result, SnapshotRecord};
use serde::{Deserialize, Serialize};
use sqlx::sqlite::SqliteRow;
use sqlx::Row as _;

use crate::client::{map_sqlx_error, AuditStore};

const SELECT_COLUMNS: &str = "id, origin_url, click_type, click_value, page_url, page_hash, screenshot_path, created_at";

/// One rollup row: a calendar day and origin, with event totals.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyStat {
    pub day: NaiveDate,
    pub origin_url: String,
    /// Total capture events for this (day, origin) group.
    pub total_events: i64,
    /// Distinct non-absent `page_hash` values in the group. A jump here for
    /// a stable origin is the anomaly signal this rollup exists for.
    pub unique_pages: i64,
}

fn record_from_row(row: &SqliteRow) -> Result<SnapshotRecord> {
    let id: i64 = row.try_get("id").map_err(map_sqlx_error)?;
    let click_type: String = row.try_get("click_type").map_err(map_sqlx_error)?;
    let click_type: ClickType = click_type.parse().map_err(|_| {
        monitor_core::Error::from(PersistenceError::Query(format!(
            "row {id} has unknown click_type"
        )))
    })?;

    Ok(SnapshotRecord {
        id,
        origin_url: row.try_get("origin_url").map_err(map_sqlx_error)?,
        click_type,
        click_value: row.try_get("click_value").map_err(map_sqlx_error)?,
        page_url: row.try_get("page_url").map_err(map_sqlx_error)?,
        page_hash: row.try_get("page_hash").map_err(map_sqlx_error)?,
        screenshot_path: row.try_get("screenshot_path").map_err(map_sqlx_error)?,
        created_at: row.try_get("created_at").map_err(map_sqlx_error)?,
    })
}

/// Detail rows in `[start, end)`, ordered by origin then time.
async fn events_in_window(
    store: &AuditStore,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Result<Vec<SnapshotRecord>> {
    let sql = format!(
        "SELECT {SELECT_COLUMNS} FROM external_link_snapshot \
         WHERE created_at >= ? AND created_at < ? \
         ORDER BY origin_url ASC, created_at ASC"
    );

    let rows = sqlx::query(&sql)
        .bind(start)
        .bind(end)
        .fetch_all(store.pool())
        .await
        .map_err(map_sqlx_error)?;

    rows.iter().map(record_from_row).collect()
}

/// Per-day, per-origin rollup over the trailing 60 days.
///
/// The window is `[now - 60 days, now)`, both edges bound explicitly so the
/// result is insensitive to rows timestamped in the future.
pub async fn daily_stats_last_60_days(store: &AuditStore) -> Result<Vec<DailyStat>> {
    let now = Utc::now().naive_utc();
    let since = now - Duration::days(60);

    let rows = sqlx::query(
        "SELECT date(created_at) AS day, origin_url, \
                COUNT(id) AS total_events, \
                COUNT(DISTINCT page_hash) AS unique_pages \
         FROM external_link_snapshot \
         WHERE created_at >= ? AND created_at < ? \
         GROUP BY day, origin_url \
         ORDER BY day ASC, origin_url ASC",
    )
    .bind(since)
    .bind(now)
    .fetch_all(store.pool())
    .await
    .map_err(map_sqlx_error)?;

    rows.iter()
        .map(|row| {
            Ok(DailyStat {
                day: row.try_get("day").map_err(map_sqlx_error)?,
                origin_url: row.try_get("origin_url").map_err(map_sqlx_error)?,
                total_events: row.try_get("total_events").map_err(map_sqlx_error)?,
                unique_pages: row.try_get("unique_pages").map_err(map_sqlx_error)?,
            })
        })
        .collect()
}

/// All of yesterday's rows, ordered by `created_at` ascending.
pub async fn yesterday_events(store: &AuditStore) -> Result<Vec<SnapshotRecord>> {
    let today_start = Utc::now().date_naive().and_time(NaiveTime::MIN);
    let yesterday_start = today_start - Duration::days(1);

    let sql = format!(
        "SELECT {SELECT_COLUMNS} FROM external_link_snapshot \
         WHERE created_at >= ? AND created_at < ? \
         ORDER BY created_at ASC"
    );

    let rows = sqlx::query(&sql)
        .bind(yesterday_start)
        .bind(today_start)
        .fetch_all(store.pool())
        .await
        .map_err(map_sqlx_error)?;

    rows.iter().map(record_from_row).collect()
}

/// Detail rows for one calendar day, `[day, day + 1)`.
pub async fn events_by_day(store: &AuditStore, day: NaiveDate) -> Result<Vec<SnapshotRecord>> {
    let start = day.and_time(NaiveTime::MIN);
    let end = (day + Duration::days(1)).and_time(NaiveTime::MIN);
    events_in_window(store, start, end).await
}

/// Detail rows for one calendar month, `[first_of_month, first_of_next)`.
pub async fn events_by_month(
    store: &AuditStore,
    year: i32,
    month: u32,
) -> Result<Vec<SnapshotRecord>> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| monitor_core::Error::validation(format!("invalid month: {year}-{month}")))?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(|| monitor_core::Error::validation(format!("invalid month: {year}-{month}")))?;

    events_in_window(
        store,
        first.and_time(NaiveTime::MIN),
        next.and_time(NaiveTime::MIN),
    )
    .await
}

/// Detail rows in the inclusive range `[start, end]`.
pub async fn events_by_range(
    store: &AuditStore,
    start: NaiveDateTime,
    end: NaiveDateTime,
) -> Result<Vec<SnapshotRecord>> {
    let sql = format!(
        "SELECT {SELECT_COLUMNS} FROM external_link_snapshot \
         WHERE created_at >= ? AND created_at <= ? \
         ORDER BY origin_url ASC, created_at ASC"
    );

    let rows = sqlx::query(&sql)
        .bind(start)
        .bind(end)
        .fetch_all(store.pool())
        .await
        .map_err(map_sqlx_error)?;

    rows.iter().map(record_from_row).collect()
}

/// Total row count, used by tests and operational checks.
pub async fn count_snapshots(store: &AuditStore) -> Result<i64> {
    let row: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM external_link_snapshot")
        .fetch_one(store.pool())
        .await
        .map_err(map_sqlx_error)?;
    Ok(row.0)
}
