//! Render client trait and HTTP implementation.

use std::time::Duration;

use async_trait::async_trait;
use monitor_core::RenderError;
use tracing::{debug, warn};

use crate::config::RenderConfig;
use crate::wire::{RenderClickRequest, RenderClickResponse};

/// Normalized result of a successful render call.
///
/// `page_url` and `page_hash` may independently be absent; the screenshot
/// payload is mandatory (still base64-encoded, the artifact store owns
/// decoding).
#[derive(Debug, Clone)]
pub struct RenderOutcome {
    pub page_url: Option<String>,
    pub page_hash: Option<String>,
    pub screenshot_base64: String,
}

/// Seam for the render collaborator, so tests can substitute a mock.
#[async_trait]
pub trait RenderClient: Send + Sync {
    /// Perform one click render. A single attempt, no retry.
    async fn render_click(&self, request: RenderClickRequest)
        -> Result<RenderOutcome, RenderError>;
}

/// Production render client over HTTP.
pub struct HttpRenderClient {
    base_url: String,
    timeout_secs: u64,
    http_client: reqwest::Client,
}

impl HttpRenderClient {
    pub fn new(config: RenderConfig) -> monitor_core::Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| monitor_core::Error::internal(format!("HTTP client build failed: {e}")))?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout_secs: config.timeout_secs,
            http_client,
        })
    }
}

#[async_trait]
impl RenderClient for HttpRenderClient {
    async fn render_click(
        &self,
        request: RenderClickRequest,
    ) -> Result<RenderOutcome, RenderError> {
        let url = format!("{}/render-click", self.base_url);

        debug!(
            url = %request.url,
            click_type = %request.click.kind,
            click_value = %request.click.value,
            "Calling render service"
        );

        let response = self
            .http_client
            .post(&url)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "Render service request failed");
                if e.is_timeout() {
                    RenderError::Timeout {
                        timeout_secs: self.timeout_secs,
                    }
                } else {
                    RenderError::Transport(e.to_string())
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "Render service returned error status");
            return Err(RenderError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let body: RenderClickResponse = response.json().await.map_err(|e| {
            warn!(error = %e, "Failed to parse render response");
            if e.is_timeout() {
                RenderError::Timeout {
                    timeout_secs: self.timeout_secs,
                }
            } else {
                RenderError::Transport(format!("invalid response body: {e}"))
            }
        })?;

        // A transport 200 with an internal failure status is still a failure.
        if body.status != "ok" {
            let message = body
                .message
                .unwrap_or_else(|| format!("status was {:?}", body.status));
            warn!(message = %message, "Render service reported failure");
            return Err(RenderError::Service(message));
        }

        let screenshot_base64 = body
            .screenshot_base64
            .ok_or_else(|| RenderError::Service("success response missing screenshot".into()))?;

        debug!(
            page_url = body.page_url.as_deref().unwrap_or("<unknown>"),
            "Render service call succeeded"
        );

        Ok(RenderOutcome {
            page_url: body.page_url,
            page_hash: body.page_hash,
            screenshot_base64,
        })
    }
}
