//! Internal telemetry for the link monitor.
//!
//! Metrics are collected in-process with atomics and exposed through the
//! health endpoint; there is no external metrics system.

pub mod health;
pub mod metrics;
pub mod tracing_setup;

pub use health::*;
pub use metrics::*;
pub use tracing_setup::*;
