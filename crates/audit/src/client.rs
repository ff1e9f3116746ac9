//! Audit store client wrapper.

use std::time::Duration;

use monitor_core::{PersistenceError, Result};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use tracing::info;

use crate::config::AuditConfig;

/// Pooled handle to the audit log database.
#[derive(Clone)]
pub struct AuditStore {
    pool: SqlitePool,
}

impl AuditStore {
    /// Open the database and build the connection pool.
    pub async fn connect(config: &AuditConfig) -> Result<Self> {
        let options = SqliteConnectOptions::new()
            .filename(&config.database_path)
            .create_if_missing(true)
            // WAL lets concurrent captures insert while queries read.
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));

        let pool = SqlitePoolOptions::new()
            .min_connections(config.min_connections)
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(config.acquire_timeout_secs))
            .connect_with(options)
            .await
            .map_err(map_sqlx_error)?;

        info!(
            path = %config.database_path,
            max_connections = config.max_connections,
            "Audit store connected"
        );

        Ok(Self { pool })
    }

    /// Cheap liveness probe used by startup and health checks.
    pub async fn ping(&self) -> Result<()> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(map_sqlx_error)?;
        Ok(())
    }

    /// Close the pool, waiting for borrowed connections to return.
    pub async fn close(&self) {
        self.pool.close().await;
    }

    pub(crate) fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

/// Map sqlx errors into the persistence taxonomy: pool exhaustion and
/// lifecycle failures are distinct from query failures.
pub(crate) fn map_sqlx_error(e: sqlx::Error) -> monitor_core::Error {
    match e {
        sqlx::Error::PoolTimedOut | sqlx::Error::PoolClosed => {
            PersistenceError::Pool(e.to_string()).into()
        }
        other => PersistenceError::Query(other.to_string()).into(),
    }
}
