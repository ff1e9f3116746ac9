//! Application state shared across handlers.

use std::sync::Arc;

use artifact_store::ArtifactStore;
use audit_store::AuditStore;
use capture::CapturePipeline;

/// Shared application state.
///
/// Collaborators are constructed once at startup and injected here; nothing
/// in the request path reaches for process-wide singletons.
#[derive(Clone)]
pub struct AppState {
    /// Capture orchestrator (render -> artifact -> audit).
    pub pipeline: Arc<CapturePipeline>,
    /// Audit log, used directly by the read-only query handlers.
    pub audit: Arc<AuditStore>,
    /// Artifact store, used by operational diagnostics.
    pub artifacts: Arc<ArtifactStore>,
}

impl AppState {
    pub fn new(
        pipeline: Arc<CapturePipeline>,
        audit: Arc<AuditStore>,
        artifacts: Arc<ArtifactStore>,
    ) -> Self {
        Self {
            pipeline,
            audit,
            artifacts,
        }
    }
}
