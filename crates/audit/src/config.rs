//! Audit store configuration.

use serde::{Deserialize, Serialize};

/// Audit log database configuration.
///
/// The pool is deliberately small and bounded: callers borrow a connection
/// per query or write and wait at most `acquire_timeout_secs` before the
/// operation fails instead of queueing indefinitely.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditConfig {
    /// Path to the SQLite database file; created if missing.
    #[serde(default = "default_database_path")]
    pub database_path: String,
    #[serde(default = "default_min_connections")]
    pub min_connections: u32,
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,
    #[serde(default = "default_acquire_timeout_secs")]
    pub acquire_timeout_secs: u64,
}

fn default_database_path() -> String {
    "data/audit.db".to_string()
}

fn default_min_connections() -> u32 {
    1
}

fn default_max_connections() -> u32 {
    10
}

fn default_acquire_timeout_secs() -> u64 {
    60
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            database_path: default_database_path(),
            min_connections: default_min_connections(),
            max_connections: default_max_connections(),
            acquire_timeout_secs: default_acquire_timeout_secs(),
        }
    }
}

impl AuditConfig {
    /// Config pointing at a throwaway database file, for tests.
    pub fn at_path(path: impl Into<String>) -> Self {
        Self {
            database_path: path.into(),
            ..Default::default()
        }
    }
}
