//! API routes.

pub mod health;
pub mod snapshot;
pub mod stats;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::state::AppState;

/// Creates the API router.
pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        .route("/health/ready", get(health::ready_handler))
        .route("/health/live", get(health::live_handler))
        .route(
            "/api/external-link-snapshot",
            post(snapshot::create_snapshot_handler),
        )
        .route(
            "/get-daily-stats-last-60-days",
            post(stats::daily_stats_handler),
        )
        .route("/get-yesterday-events", post(stats::yesterday_handler))
        .route("/get-events-by-day", post(stats::events_by_day_handler))
        .route("/get-events-by-month", post(stats::events_by_month_handler))
        .route("/get-events-by-range", post(stats::events_by_range_handler))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
