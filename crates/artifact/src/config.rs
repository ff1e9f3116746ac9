//! Artifact store configuration.

use serde::{Deserialize, Serialize};

/// Screenshot storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactConfig {
    /// Directory screenshots are written to; created at startup if missing.
    #[serde(default = "default_screenshot_dir")]
    pub screenshot_dir: String,
}

fn default_screenshot_dir() -> String {
    "data/screenshots".to_string()
}

impl Default for ArtifactConfig {
    fn default() -> Self {
        Self {
            screenshot_dir: default_screenshot_dir(),
        }
    }
}
