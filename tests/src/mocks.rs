//! Mock implementations for testing.

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine as _;
use monitor_core::RenderError;
use parking_lot::Mutex;
use render_client::{RenderClickRequest, RenderClient, RenderOutcome};

/// How the mock render collaborator behaves on the next call.
#[derive(Debug, Clone)]
pub enum MockRenderMode {
    /// Return a success outcome built from the configured payload.
    Success,
    /// Well-formed response with a failure status.
    ServiceFailure(String),
    /// Transport timeout.
    Timeout,
    /// Connection-level failure.
    TransportError(String),
    /// Success response whose screenshot payload is not valid base64,
    /// forcing the artifact store's decode step to fail.
    CorruptScreenshot,
}

/// Mock render client that captures requests in memory.
///
/// Implements the same `RenderClient` trait as `HttpRenderClient`, so
/// tests exercise every production code path except the network call.
pub struct MockRenderClient {
    mode: Mutex<MockRenderMode>,
    screenshot: Mutex<Vec<u8>>,
    page_url: Mutex<Option<String>>,
    page_hash: Mutex<Option<String>>,
    calls: Mutex<Vec<RenderClickRequest>>,
}

impl MockRenderClient {
    pub fn new() -> Self {
        Self {
            mode: Mutex::new(MockRenderMode::Success),
            screenshot: Mutex::new(b"fake png bytes".to_vec()),
            page_url: Mutex::new(Some("https://landing.example.com/page".into())),
            page_hash: Mutex::new(Some("deadbeefcafe".into())),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn set_mode(&self, mode: MockRenderMode) {
        *self.mode.lock() = mode;
    }

    /// Screenshot bytes the next success outcome will carry.
    pub fn set_screenshot(&self, bytes: impl Into<Vec<u8>>) {
        *self.screenshot.lock() = bytes.into();
    }

    pub fn screenshot_len(&self) -> usize {
        self.screenshot.lock().len()
    }

    /// What the collaborator reports as landing URL / content fingerprint;
    /// either may be `None` to simulate a partially-informative render.
    pub fn set_page(&self, page_url: Option<&str>, page_hash: Option<&str>) {
        *self.page_url.lock() = page_url.map(Into::into);
        *self.page_hash.lock() = page_hash.map(Into::into);
    }

    pub fn calls(&self) -> Vec<RenderClickRequest> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }
}

impl Default for MockRenderClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RenderClient for MockRenderClient {
    async fn render_click(
        &self,
        request: RenderClickRequest,
    ) -> Result<RenderOutcome, RenderError> {
        self.calls.lock().push(request);

        let mode = self.mode.lock().clone();
        match mode {
            MockRenderMode::Success => Ok(RenderOutcome {
                page_url: self.page_url.lock().clone(),
                page_hash: self.page_hash.lock().clone(),
                screenshot_base64: BASE64.encode(&*self.screenshot.lock()),
            }),
            MockRenderMode::ServiceFailure(msg) => Err(RenderError::Service(msg)),
            MockRenderMode::Timeout => Err(RenderError::Timeout { timeout_secs: 120 }),
            MockRenderMode::TransportError(msg) => Err(RenderError::Transport(msg)),
            MockRenderMode::CorruptScreenshot => Ok(RenderOutcome {
                page_url: self.page_url.lock().clone(),
                page_hash: self.page_hash.lock().clone(),
                screenshot_base64: "%%% definitely not base64 %%%".into(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use monitor_core::ClickType;
    use render_client::ClickLocator;

    fn request() -> RenderClickRequest {
        RenderClickRequest {
            url: "https://origin.example.com".into(),
            click: ClickLocator {
                kind: ClickType::Css,
                value: "#download".into(),
            },
            wait_after_click_ms: 0,
            full_page: true,
        }
    }

    #[tokio::test]
    async fn mock_captures_requests_and_returns_payload() {
        let mock = MockRenderClient::new();
        mock.set_screenshot(b"bytes".to_vec());

        let outcome = mock.render_click(request()).await.unwrap();
        assert_eq!(BASE64.decode(outcome.screenshot_base64).unwrap(), b"bytes");
        assert_eq!(mock.call_count(), 1);
        assert_eq!(mock.calls()[0].click.value, "#download");
    }

    #[tokio::test]
    async fn mock_failure_modes_map_to_render_error_kinds() {
        let mock = MockRenderClient::new();

        mock.set_mode(MockRenderMode::Timeout);
        assert!(matches!(
            mock.render_click(request()).await.unwrap_err(),
            RenderError::Timeout { .. }
        ));

        mock.set_mode(MockRenderMode::ServiceFailure("no such element".into()));
        assert!(matches!(
            mock.render_click(request()).await.unwrap_err(),
            RenderError::Service(_)
        ));
    }
}
