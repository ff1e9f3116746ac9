//! External Link Click Monitor
//!
//! Captures tamper-evident snapshots of outbound link clicks:
//! - drives a headless render service to perform the click
//! - stores the landing page URL, content fingerprint and screenshot
//! - appends an immutable audit row per capture
//! - serves rollup and detail queries over the audit log

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::{error, info};

use api::{router, AppState};
use artifact_store::{ArtifactConfig, ArtifactStore};
use audit_store::{AuditConfig, AuditStore};
use capture::CapturePipeline;
use render_client::{HttpRenderClient, RenderConfig};
use telemetry::{health, init_tracing_from_env};

/// Application configuration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
struct Config {
    #[serde(default = "default_host")]
    host: String,
    #[serde(default = "default_port")]
    port: u16,

    #[serde(default)]
    render: RenderConfig,

    #[serde(default)]
    artifacts: ArtifactConfig,

    #[serde(default)]
    audit: AuditConfig,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            render: RenderConfig::default(),
            artifacts: ArtifactConfig::default(),
            audit: AuditConfig::default(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    // Initialize tracing
    init_tracing_from_env();

    info!(
        "Starting External Link Click Monitor v{}",
        env!("CARGO_PKG_VERSION")
    );

    // Load configuration
    let config = load_config()?;
    info!(
        render_url = %config.render.base_url,
        screenshot_dir = %config.artifacts.screenshot_dir,
        database = %config.audit.database_path,
        "Loaded configuration"
    );

    // Open the audit store and create the schema
    let audit = Arc::new(
        AuditStore::connect(&config.audit)
            .await
            .context("Failed to connect to audit store")?,
    );
    audit_store::init_schema(&audit)
        .await
        .context("Failed to initialize audit schema")?;

    // Open the artifact store (creates the screenshot directory)
    let artifacts = Arc::new(
        ArtifactStore::new(config.artifacts.clone())
            .await
            .context("Failed to open artifact store")?,
    );

    // Render client for the headless click collaborator
    let render = Arc::new(
        HttpRenderClient::new(config.render.clone())
            .context("Failed to create render client")?,
    );

    // Capture pipeline over the three collaborators
    let pipeline = Arc::new(CapturePipeline::new(
        render,
        artifacts.clone(),
        audit.clone(),
    ));

    // Check health and update status
    check_health(&audit, &artifacts).await;

    // Create application state and router
    let state = AppState::new(pipeline, audit.clone(), artifacts);
    let app = router(state);

    // Start HTTP server
    let addr: SocketAddr = format!("{}:{}", config.host, config.port)
        .parse()
        .context("Invalid server address")?;

    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("Failed to bind to address")?;

    // Run server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Server error")?;

    info!("Shutting down...");
    audit.close().await;
    info!("Shutdown complete");
    Ok(())
}

/// Load configuration from files and environment.
fn load_config() -> Result<Config> {
    let config = config::Config::builder()
        // Start with defaults
        .add_source(config::Config::try_from(&Config::default())?)
        // Load from config file if exists
        .add_source(
            config::File::with_name("config/default")
                .required(false)
                .format(config::FileFormat::Toml),
        )
        // Override with environment variables
        .add_source(
            config::Environment::default()
                .separator("__")
                .prefix("MONITOR")
                .try_parsing(true),
        )
        .build()
        .context("Failed to build configuration")?;

    let mut config: Config = config
        .try_deserialize()
        .context("Failed to deserialize configuration")?;

    // Manual overrides for nested config from environment
    // The config crate's nested parsing doesn't work reliably with underscored field names
    if let Ok(url) = std::env::var("MONITOR_RENDER_URL") {
        config.render.base_url = url;
    }
    if let Ok(dir) = std::env::var("MONITOR_SCREENSHOT_DIR") {
        config.artifacts.screenshot_dir = dir;
    }
    if let Ok(path) = std::env::var("MONITOR_DATABASE_PATH") {
        config.audit.database_path = path;
    }

    Ok(config)
}

/// Check component health on startup.
async fn check_health(audit: &AuditStore, artifacts: &ArtifactStore) {
    match audit.ping().await {
        Ok(()) => {
            health().audit.set_healthy();
            info!("Audit store: healthy");
        }
        Err(e) => {
            health().audit.set_unhealthy(e.to_string());
            error!("Audit store: unhealthy ({})", e);
        }
    }

    if tokio::fs::metadata(artifacts.dir())
        .await
        .map(|m| m.is_dir())
        .unwrap_or(false)
    {
        health().artifacts.set_healthy();
        info!("Artifact store: healthy");
    } else {
        health().artifacts.set_unhealthy("screenshot dir missing");
        error!("Artifact store: unhealthy");
    }
}

/// Graceful shutdown signal handler.
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C signal");
        }
        _ = terminate => {
            info!("Received terminate signal");
        }
    }
}
