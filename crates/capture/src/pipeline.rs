//! The capture pipeline.
//!
//! Linear three-step sequence per request: render the click, persist the
//! screenshot, insert the audit row. Any step failure aborts the whole
//! request; there is no retry and no compensating rollback. The audit row
//! is only ever written after the artifact is durably stored, so a row's
//! `screenshot_path` never dangles. The reverse loss is accepted: if the
//! artifact write fails, the render result (page_url/page_hash) is
//! discarded with it rather than recording a half-complete row.

use std::sync::Arc;
use std::time::Instant;

use artifact_store::ArtifactStore;
use audit_store::AuditStore;
use monitor_core::{CreateSnapshotRequest, NewSnapshot, Result};
use render_client::{ClickLocator, RenderClickRequest, RenderClient};
use telemetry::metrics;
use tracing::{info, warn};

/// Orchestrates one capture request against the three collaborators.
///
/// Stateless between invocations: concurrent captures share nothing but the
/// underlying connection pool and can run in any interleaving.
pub struct CapturePipeline {
    render: Arc<dyn RenderClient>,
    artifacts: Arc<ArtifactStore>,
    audit: Arc<AuditStore>,
}

impl CapturePipeline {
    pub fn new(
        render: Arc<dyn RenderClient>,
        artifacts: Arc<ArtifactStore>,
        audit: Arc<AuditStore>,
    ) -> Self {
        Self {
            render,
            artifacts,
            audit,
        }
    }

    /// Execute one capture and return the new audit row id.
    pub async fn create_snapshot(&self, request: &CreateSnapshotRequest) -> Result<i64> {
        let start = Instant::now();

        info!(
            origin_url = %request.origin_url,
            click_type = %request.click_type,
            click_value = %request.click_value,
            "Starting capture"
        );

        // Step 1: drive the click in the render collaborator.
        metrics().render_calls.inc();
        let render_start = Instant::now();
        let outcome = self
            .render
            .render_click(RenderClickRequest {
                url: request.origin_url.clone(),
                click: ClickLocator {
                    kind: request.click_type,
                    value: request.click_value.clone(),
                },
                wait_after_click_ms: request.wait_after_click_ms,
                full_page: request.full_page,
            })
            .await
            .inspect_err(|e| {
                metrics().render_failures.inc();
                metrics().snapshot_failures.inc();
                warn!(error = %e, "Capture aborted: render failed");
            })?;
        metrics()
            .render_latency_ms
            .observe(render_start.elapsed().as_millis() as u64);

        info!(
            page_url = outcome.page_url.as_deref().unwrap_or("<unknown>"),
            page_hash = outcome.page_hash.as_deref().unwrap_or("<absent>"),
            "Render complete"
        );

        // Step 2: persist the screenshot before anything is recorded.
        let screenshot_path = self
            .artifacts
            .save_screenshot(&outcome.screenshot_base64)
            .await
            .inspect_err(|e| {
                metrics().artifact_write_errors.inc();
                metrics().snapshot_failures.inc();
                warn!(error = %e, "Capture aborted: screenshot write failed");
            })?;
        metrics().artifacts_written.inc();

        // Step 3: append the audit row.
        let snapshot_id = audit_store::insert_snapshot(
            &self.audit,
            &NewSnapshot {
                origin_url: request.origin_url.clone(),
                click_type: request.click_type,
                click_value: request.click_value.clone(),
                page_url: outcome.page_url,
                page_hash: outcome.page_hash,
                screenshot_path,
            },
        )
        .await
        .inspect_err(|e| {
            metrics().audit_insert_errors.inc();
            metrics().snapshot_failures.inc();
            warn!(error = %e, "Capture aborted: audit insert failed");
        })?;
        metrics().audit_inserts.inc();

        let latency_ms = start.elapsed().as_millis() as u64;
        metrics().snapshots_created.inc();
        metrics().snapshot_latency_ms.observe(latency_ms);

        info!(snapshot_id, latency_ms, "Capture complete");
        Ok(snapshot_id)
    }
}
