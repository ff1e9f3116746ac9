//! Snapshot domain types.
//!
//! A snapshot is one immutable audit row describing a completed capture:
//! the page a click originated from, the locator used to find the clickable
//! element, where the browser ended up, a content fingerprint of the landing
//! page, and a reference to the stored screenshot.

use std::fmt;
use std::str::FromStr;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Locator strategy used to find the clickable element on the origin page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClickType {
    /// Match by visible button/link text.
    Text,
    /// CSS selector.
    Css,
    /// XPath expression.
    Xpath,
    /// ARIA accessibility query.
    Aria,
}

impl ClickType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Text => "text",
            Self::Css => "css",
            Self::Xpath => "xpath",
            Self::Aria => "aria",
        }
    }
}

impl fmt::Display for ClickType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClickType {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "text" => Ok(Self::Text),
            "css" => Ok(Self::Css),
            "xpath" => Ok(Self::Xpath),
            "aria" => Ok(Self::Aria),
            other => Err(crate::Error::validation(format!(
                "unknown click_type: {other}"
            ))),
        }
    }
}

fn default_wait_after_click_ms() -> u32 {
    3000
}

fn default_full_page() -> bool {
    true
}

/// Request to capture one external link click.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSnapshotRequest {
    /// The monitored page the click originates from.
    pub origin_url: String,
    pub click_type: ClickType,
    /// Locator payload: button text, CSS selector, XPath or ARIA query.
    pub click_value: String,
    /// How long the browser waits after the click before capturing, in ms.
    #[serde(default = "default_wait_after_click_ms")]
    pub wait_after_click_ms: u32,
    /// Whether the screenshot covers the full page or just the viewport.
    #[serde(default = "default_full_page")]
    pub full_page: bool,
}

impl CreateSnapshotRequest {
    /// Validate request fields the schema layer cannot express.
    pub fn validate(&self) -> crate::Result<()> {
        if self.origin_url.trim().is_empty() {
            return Err(crate::Error::validation("origin_url must not be empty"));
        }
        if self.click_value.trim().is_empty() {
            return Err(crate::Error::validation("click_value must not be empty"));
        }
        Ok(())
    }
}

/// Payload for one audit row insert.
///
/// `page_url` and `page_hash` may independently be absent: the render
/// collaborator can succeed overall while failing to determine either, and
/// that partial outcome is still worth recording. `screenshot_path` is
/// always present; a snapshot is never persisted without its artifact.
#[derive(Debug, Clone)]
pub struct NewSnapshot {
    pub origin_url: String,
    pub click_type: ClickType,
    pub click_value: String,
    pub page_url: Option<String>,
    pub page_hash: Option<String>,
    pub screenshot_path: String,
}

/// One persisted, immutable audit row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SnapshotRecord {
    pub id: i64,
    pub origin_url: String,
    pub click_type: ClickType,
    pub click_value: String,
    pub page_url: Option<String>,
    pub page_hash: Option<String>,
    pub screenshot_path: String,
    /// Server-assigned at insert time; defines all temporal ordering.
    pub created_at: NaiveDateTime,
}
