//! Screenshot artifact persistence.
//!
//! Artifacts are immutable: every save creates a new file under the
//! configured directory and nothing here ever overwrites or deletes one.

pub mod config;
pub mod store;

pub use config::ArtifactConfig;
pub use store::ArtifactStore;
