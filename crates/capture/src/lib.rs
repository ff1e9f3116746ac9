//! Capture orchestration: one request in, one audit row out.

pub mod pipeline;

pub use pipeline::CapturePipeline;
