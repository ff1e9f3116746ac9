//! Append-only audit log of capture events.
//!
//! One table, insert-only: rows are never updated or deleted by the
//! service. The read side answers "what happened and when" queries used for
//! security review (daily rollups, per-day/month detail, arbitrary ranges).

pub mod client;
pub mod config;
pub mod insert;
pub mod query;
pub mod schema;

pub use client::AuditStore;
pub use config::AuditConfig;
pub use insert::{insert_snapshot, insert_snapshot_at};
pub use query::{
    count_snapshots, daily_stats_last_60_days, events_by_day, events_by_month, events_by_range,
    yesterday_events, DailyStat,
};
pub use schema::init_schema;
