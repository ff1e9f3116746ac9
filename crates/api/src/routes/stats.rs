//! Read-only query endpoints over the audit log.

use axum::{extract::State, Json};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use monitor_core::SnapshotRecord;
use serde::Deserialize;
use telemetry::metrics;
use tracing::error;

use crate::response::ApiError;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct GetDayRequest {
    /// Calendar date, `YYYY-MM-DD`.
    pub day: String,
}

#[derive(Debug, Deserialize)]
pub struct GetMonthRequest {
    pub year: i32,
    pub month: u32,
}

#[derive(Debug, Deserialize)]
pub struct GetRangeRequest {
    /// ISO-8601 timestamp, inclusive.
    pub start_time: String,
    /// ISO-8601 timestamp, inclusive.
    pub end_time: String,
}

fn parse_day(s: &str) -> Result<NaiveDate, ApiError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| ApiError::bad_request(format!("invalid day (expected YYYY-MM-DD): {s}")))
}

fn parse_timestamp(s: &str) -> Result<NaiveDateTime, ApiError> {
    NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f"))
        // Offset-carrying timestamps (e.g. `...Z`, `...+02:00`) are
        // normalized to UTC, which is what the audit log stores.
        .or_else(|_| DateTime::parse_from_rfc3339(s).map(|dt| dt.with_timezone(&Utc).naive_utc()))
        .map_err(|_| ApiError::bad_request(format!("invalid ISO-8601 timestamp: {s}")))
}

fn query_error(e: monitor_core::Error) -> ApiError {
    metrics().query_failures.inc();
    error!(error = %e, "Audit query failed");
    ApiError::from(e)
}

/// POST /get-daily-stats-last-60-days - Per-day, per-origin rollup.
pub async fn daily_stats_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<audit_store::DailyStat>>, ApiError> {
    metrics().query_requests.inc();
    let stats = audit_store::daily_stats_last_60_days(&state.audit)
        .await
        .map_err(query_error)?;
    Ok(Json(stats))
}

/// POST /get-yesterday-events - Yesterday's detail rows.
pub async fn yesterday_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<SnapshotRecord>>, ApiError> {
    metrics().query_requests.inc();
    let rows = audit_store::yesterday_events(&state.audit)
        .await
        .map_err(query_error)?;
    Ok(Json(rows))
}

/// POST /get-events-by-day - Detail rows for one calendar date.
pub async fn events_by_day_handler(
    State(state): State<AppState>,
    Json(request): Json<GetDayRequest>,
) -> Result<Json<Vec<SnapshotRecord>>, ApiError> {
    metrics().query_requests.inc();
    let day = parse_day(&request.day)?;
    let rows = audit_store::events_by_day(&state.audit, day)
        .await
        .map_err(query_error)?;
    Ok(Json(rows))
}

/// POST /get-events-by-month - Detail rows for one calendar month.
pub async fn events_by_month_handler(
    State(state): State<AppState>,
    Json(request): Json<GetMonthRequest>,
) -> Result<Json<Vec<SnapshotRecord>>, ApiError> {
    metrics().query_requests.inc();
    if !(1..=12).contains(&request.month) {
        return Err(ApiError::bad_request(format!(
            "month must be 1-12, got {}",
            request.month
        )));
    }
    let rows = audit_store::events_by_month(&state.audit, request.year, request.month)
        .await
        .map_err(query_error)?;
    Ok(Json(rows))
}

/// POST /get-events-by-range - Detail rows in an inclusive time range.
pub async fn events_by_range_handler(
    State(state): State<AppState>,
    Json(request): Json<GetRangeRequest>,
) -> Result<Json<Vec<SnapshotRecord>>, ApiError> {
    metrics().query_requests.inc();
    let start = parse_timestamp(&request.start_time)?;
    let end = parse_timestamp(&request.end_time)?;
    let rows = audit_store::events_by_range(&state.audit, start, end)
        .await
        .map_err(query_error)?;
    Ok(Json(rows))
}
