//! Screenshot artifact store.

use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use chrono::Utc;
use monitor_core::StoreError;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::ArtifactConfig;

/// Persists screenshot bytes under collision-resistant, time-ordered names.
pub struct ArtifactStore {
    dir: PathBuf,
}

impl ArtifactStore {
    /// Open the store, creating the screenshot directory if needed.
    pub async fn new(config: ArtifactConfig) -> Result<Self, StoreError> {
        let dir = PathBuf::from(&config.screenshot_dir);
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| StoreError::Write(format!("cannot create {}: {e}", dir.display())))?;

        info!(dir = %dir.display(), "Artifact store ready");
        Ok(Self { dir })
    }

    /// Decode and persist one screenshot, returning its locator.
    ///
    /// Names combine a second-granularity timestamp with a short random
    /// suffix: unique in practice within a process, and sortable by time.
    /// The write goes straight to the final path; a crash mid-write can
    /// leave a partial file, but no audit row will ever reference it since
    /// the row is only inserted after this call returns.
    pub async fn save_screenshot(&self, screenshot_base64: &str) -> Result<String, StoreError> {
        let bytes = BASE64
            .decode(screenshot_base64)
            .map_err(|e| StoreError::Decode(e.to_string()))?;

        let suffix = Uuid::new_v4().simple().to_string();
        let filename = format!(
            "{}_{}.png",
            Utc::now().format("%Y%m%d_%H%M%S"),
            &suffix[..8]
        );
        let path = self.dir.join(&filename);

        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|e| StoreError::Write(format!("{}: {e}", path.display())))?;

        debug!(path = %path.display(), bytes = bytes.len(), "Screenshot saved");
        Ok(path.to_string_lossy().into_owned())
    }

    /// Whether the artifact behind a locator exists on disk.
    ///
    /// Existence only; content integrity is not validated.
    pub async fn screenshot_exists(&self, locator: &str) -> bool {
        let exists = tokio::fs::metadata(locator)
            .await
            .map(|m| m.is_file())
            .unwrap_or(false);

        if !exists {
            warn!(locator = %locator, "Screenshot artifact missing");
        }
        exists
    }

    /// Directory this store writes into.
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}
