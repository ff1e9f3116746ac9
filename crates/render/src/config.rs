//! Render client configuration.

use serde::{Deserialize, Serialize};

/// Render collaborator configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Base URL of the render service.
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Per-call timeout budget in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "http://playwright-service:8000".to_string()
}

fn default_timeout_secs() -> u64 {
    120
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }
}
