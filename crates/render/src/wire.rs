//! Wire types for the render collaborator contract.
//!
//! Field names and shapes must stay compatible with the deployed service:
//! request `{url, click: {type, value}, wait_after_click_ms, full_page}`,
//! response `{status, page_url, page_hash, screenshot_base64}` where any
//! `status` other than `"ok"` is a logical failure.

use monitor_core::ClickType;
use serde::{Deserialize, Serialize};

/// Click locator inside a render request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClickLocator {
    #[serde(rename = "type")]
    pub kind: ClickType,
    pub value: String,
}

/// Request body for `POST {base_url}/render-click`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderClickRequest {
    pub url: String,
    pub click: ClickLocator,
    pub wait_after_click_ms: u32,
    pub full_page: bool,
}

/// Response body from the render service.
///
/// Everything except `status` is optional on the wire; a success response
/// without a screenshot is still rejected by the client.
#[derive(Debug, Clone, Deserialize)]
pub struct RenderClickResponse {
    pub status: String,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub page_url: Option<String>,
    #[serde(default)]
    pub page_hash: Option<String>,
    #[serde(default)]
    pub screenshot_base64: Option<String>,
}
