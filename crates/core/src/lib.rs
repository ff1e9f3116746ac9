//! Core types and errors for the external link click monitor.

pub mod error;
pub mod snapshot;

pub use error::{Error, PersistenceError, RenderError, Result, StoreError};
pub use snapshot::*;
