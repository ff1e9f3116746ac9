//! Snapshot creation endpoint.

use axum::{extract::State, Json};
use monitor_core::CreateSnapshotRequest;
use tracing::{error, info};

use crate::response::{ApiError, SnapshotResponse};
use crate::state::AppState;

/// POST /api/external-link-snapshot - Capture one external link click.
///
/// Drives the render collaborator, stores the screenshot, appends the audit
/// row, and returns the new snapshot id. Every call produces a brand-new
/// row; repeated clicks against the same origin are not deduplicated.
pub async fn create_snapshot_handler(
    State(state): State<AppState>,
    Json(request): Json<CreateSnapshotRequest>,
) -> Result<Json<SnapshotResponse>, ApiError> {
    request.validate()?;

    info!(
        origin_url = %request.origin_url,
        click_type = %request.click_type,
        "Snapshot requested"
    );

    let snapshot_id = state
        .pipeline
        .create_snapshot(&request)
        .await
        .map_err(|e| {
            error!(error = %e, origin_url = %request.origin_url, "Snapshot failed");
            ApiError::from(e)
        })?;

    Ok(Json(SnapshotResponse::ok(snapshot_id)))
}
