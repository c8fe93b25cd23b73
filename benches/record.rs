//! Metrics recording benchmarks
//!
//! Measures the record hot path (the only work added to a request's
//! critical path) and the scrape-time gather cost at moderate cardinality.
//!
//! Run with: `cargo bench`

use axum::http::{Method, StatusCode};
use criterion::{Criterion, criterion_group, criterion_main};
use reqstat::metrics::{MetricsOpts, RequestMetrics};

/// Benchmark recording into an already-existing series
///
/// This is the steady-state cost per request once a route's series exists.
fn bench_record_existing_series(c: &mut Criterion) {
    let metrics =
        RequestMetrics::new("bench", MetricsOpts::default()).expect("should create metrics");
    metrics
        .record(StatusCode::OK, &Method::GET, "/warm", 1.0)
        .expect("should record");

    c.bench_function("record_existing_series", |b| {
        b.iter(|| {
            metrics
                .record(StatusCode::OK, &Method::GET, "/warm", 12.5)
                .expect("should record")
        });
    });
}

/// Benchmark a text-format scrape over 100 distinct series
fn bench_gather(c: &mut Criterion) {
    let metrics =
        RequestMetrics::new("bench", MetricsOpts::default()).expect("should create metrics");
    for i in 0..100 {
        let path = format!("/route/{i}");
        metrics
            .record(StatusCode::OK, &Method::GET, &path, f64::from(i))
            .expect("should record");
    }

    c.bench_function("gather_100_series", |b| {
        b.iter(|| metrics.gather().expect("should gather"));
    });
}

criterion_group!(benches, bench_record_existing_series, bench_gather);
criterion_main!(benches);
