//! Client for the external render collaborator.
//!
//! The collaborator is a headless-browser automation service: it loads a
//! page, performs a click located by text/css/xpath/aria, waits, and returns
//! the resulting URL, a content fingerprint and a screenshot. This crate
//! only speaks its wire contract; the browser itself is out of scope.

pub mod client;
pub mod config;
pub mod wire;

pub use client::{HttpRenderClient, RenderClient, RenderOutcome};
pub use config::RenderConfig;
pub use wire::{ClickLocator, RenderClickRequest, RenderClickResponse};
