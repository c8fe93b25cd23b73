//! Reqstat - per-route HTTP request metrics for Axum
//!
//! This library instruments an Axum request pipeline: a pass-through
//! middleware counts and times every request, partitioned by status code,
//! method, and path, and the accumulated state is exposed for Prometheus
//! scraping.

pub mod cli;
pub mod config;
pub mod error;
pub mod handlers;
pub mod metrics;
pub mod middleware;
pub mod telemetry;
