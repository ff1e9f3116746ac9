//! Unified error types for the link monitor.
//!
//! Every failure mode during capture or query is one of a closed set of
//! variants, so callers can branch on the kind instead of string-matching
//! messages. Error codes:
//! - RENDER_001-004: render collaborator failures
//! - STORE_001-002: screenshot artifact failures
//! - DB_001-002: audit store failures
//! - VALID_001: request validation

use thiserror::Error;

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures from the render collaborator.
///
/// All of these are terminal for the current capture attempt; there is no
/// automatic retry anywhere in the pipeline.
#[derive(Debug, Error)]
pub enum RenderError {
    /// RENDER_001: the call exceeded the transport timeout budget.
    #[error("render service timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u64 },

    /// RENDER_002: connection or protocol level failure.
    #[error("render service transport error: {0}")]
    Transport(String),

    /// RENDER_003: transport succeeded but with a non-success HTTP status.
    #[error("render service returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// RENDER_004: well-formed response whose own status field reports
    /// failure. A transport-level 200 is not trusted on its own.
    #[error("render service reported failure: {0}")]
    Service(String),
}

impl RenderError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Timeout { .. } => "RENDER_001",
            Self::Transport(_) => "RENDER_002",
            Self::Status { .. } => "RENDER_003",
            Self::Service(_) => "RENDER_004",
        }
    }
}

/// Failures from the screenshot artifact store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// STORE_001: the screenshot payload could not be base64-decoded.
    #[error("screenshot payload is not valid base64: {0}")]
    Decode(String),

    /// STORE_002: the filesystem write failed.
    #[error("failed to write screenshot: {0}")]
    Write(String),
}

impl StoreError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Decode(_) => "STORE_001",
            Self::Write(_) => "STORE_002",
        }
    }
}

/// Failures from the audit log store.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// DB_001: could not borrow a connection from the pool in time.
    #[error("audit store connection unavailable: {0}")]
    Pool(String),

    /// DB_002: a write or query failed.
    #[error("audit store query failed: {0}")]
    Query(String),
}

impl PersistenceError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Pool(_) => "DB_001",
            Self::Query(_) => "DB_002",
        }
    }
}

/// Unified error type for the link monitor.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Render(#[from] RenderError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Persistence(#[from] PersistenceError),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Get the error code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Render(e) => e.code(),
            Self::Store(e) => e.code(),
            Self::Persistence(e) => e.code(),
            Self::Validation(_) => "VALID_001",
            Self::Internal(_) => "INTERNAL_001",
        }
    }

    /// Get the HTTP status code for this error.
    ///
    /// Capture and query failures surface as 500 with the underlying
    /// message; only request validation maps to 400.
    pub fn http_status(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            _ => 500,
        }
    }
}
