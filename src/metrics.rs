//! Request metrics aggregation with Prometheus export
//!
//! This module is the core of the crate: two label-keyed aggregation tables,
//! a request counter and a latency histogram, both partitioned by status
//! code, HTTP method, and request path. The tracking middleware feeds one
//! observation per request into [`RequestMetrics::record`]; the `/metrics`
//! endpoint reads the accumulated state back out through
//! [`RequestMetrics::gather`].
//!
//! # Concurrency
//!
//! Updates are synchronous atomic increments on the caller's task. Series
//! lookup inside [`IntCounterVec`] and [`HistogramVec`] is a read-locked
//! hash map lookup; the first observation of a new label combination takes
//! a short write lock to insert the series, and concurrent first
//! observations of the same combination collapse onto one entry. `gather`
//! reads a snapshot of the registry and never waits behind writers beyond
//! those short insertions.
//!
//! # Cardinality
//!
//! Series cardinality grows with the distinct (code, method, path)
//! combinations observed in live traffic and is never reclaimed. Services
//! with unbounded path spaces (IDs in the path, user-supplied URLs) should
//! normalize paths before recording, or scrape cardinality will grow
//! without bound.

use axum::http::{Method, StatusCode};
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};

const REQUEST_NAME: &str = "requests_total";
const LATENCY_NAME: &str = "request_duration_milliseconds";

/// Label names shared by both series, in declaration order.
const LABEL_NAMES: &[&str] = &["code", "method", "path"];

/// Default latency bucket upper bounds, in milliseconds.
pub const DEFAULT_BUCKETS: &[f64] = &[300.0, 1000.0, 2500.0, 5000.0];

/// Options for constructing [`RequestMetrics`].
#[derive(Debug, Clone, Default)]
pub struct MetricsOpts {
    /// Latency bucket upper bounds in milliseconds, strictly increasing.
    /// Empty means [`DEFAULT_BUCKETS`].
    pub buckets: Vec<f64>,
}

/// Label-keyed request metrics for one namespace
///
/// Owns a request counter (`<namespace>_requests_total`) and a latency
/// histogram (`<namespace>_request_duration_milliseconds`), both labeled by
/// `code`, `method`, and `path`, plus the [`Registry`] they are registered
/// in. Cloning is cheap and clones share the same underlying series.
#[derive(Clone, Debug)]
pub struct RequestMetrics {
    registry: Registry,
    requests: IntCounterVec,
    latency: HistogramVec,
}

impl RequestMetrics {
    /// Create a new aggregator under `namespace` with its own registry.
    ///
    /// # Errors
    ///
    /// Returns an error if the bucket configuration is not strictly
    /// increasing or if metric registration fails. Both are configuration
    /// mistakes and fatal at startup.
    pub fn new(namespace: &str, opts: MetricsOpts) -> Result<Self, prometheus::Error> {
        Self::with_registry(namespace, opts, Registry::new())
    }

    /// Create a new aggregator under `namespace`, registering into a
    /// caller-supplied registry.
    ///
    /// Callers that expose several collectors through one scrape endpoint
    /// share a registry this way. Registering a second aggregator under a
    /// namespace already claimed in `registry` fails with
    /// [`prometheus::Error::AlreadyReg`] rather than silently duplicating
    /// the series.
    pub fn with_registry(
        namespace: &str,
        opts: MetricsOpts,
        registry: Registry,
    ) -> Result<Self, prometheus::Error> {
        let buckets = if opts.buckets.is_empty() {
            DEFAULT_BUCKETS.to_vec()
        } else {
            opts.buckets
        };
        if !buckets.windows(2).all(|w| w[0] < w[1]) {
            return Err(prometheus::Error::Msg(format!(
                "latency buckets must be strictly increasing, got {buckets:?}"
            )));
        }

        let requests = IntCounterVec::new(
            Opts::new(
                REQUEST_NAME,
                "How many HTTP requests were processed, partitioned by status code, method and request path.",
            )
            .namespace(namespace),
            LABEL_NAMES,
        )?;

        let latency = HistogramVec::new(
            HistogramOpts::new(
                LATENCY_NAME,
                "How long it took to process requests in milliseconds, partitioned by status code, method and request path.",
            )
            .namespace(namespace)
            .buckets(buckets),
            LABEL_NAMES,
        )?;

        registry.register(Box::new(requests.clone()))?;
        registry.register(Box::new(latency.clone()))?;

        Ok(Self {
            registry,
            requests,
            latency,
        })
    }

    /// Record one completed request.
    ///
    /// Increments the request counter for the (code, method, path) series
    /// by one and observes `duration_ms` on the latency histogram for the
    /// same series. Both series are created lazily on the first observation
    /// of a new label combination, so the two tables always cover the same
    /// set of series.
    ///
    /// # Errors
    ///
    /// Returns an error if `duration_ms` is NaN, infinite, or negative
    /// (such values corrupt histogram statistics), or on a registry
    /// internal error. Callers on the request path log and drop the error;
    /// it must never become a request failure.
    pub fn record(
        &self,
        code: StatusCode,
        method: &Method,
        path: &str,
        duration_ms: f64,
    ) -> Result<(), prometheus::Error> {
        if !duration_ms.is_finite() {
            return Err(prometheus::Error::Msg(format!(
                "duration must be finite, got {duration_ms}"
            )));
        }
        if duration_ms < 0.0 {
            return Err(prometheus::Error::Msg(format!(
                "duration must be non-negative, got {duration_ms}"
            )));
        }

        let labels = [code.as_str(), method.as_str(), path];
        self.requests.get_metric_with_label_values(&labels)?.inc();
        self.latency
            .get_metric_with_label_values(&labels)?
            .observe(duration_ms);
        Ok(())
    }

    /// Encode all current series in the Prometheus text exposition format.
    ///
    /// The output enumerates, per observed label combination, the counter
    /// value and the histogram's cumulative bucket counts (including the
    /// implicit `+Inf` bucket), total sum, and total count.
    pub fn gather(&self) -> Result<String, prometheus::Error> {
        let metric_families = self.registry.gather();

        let mut buffer = Vec::new();
        TextEncoder::new().encode(&metric_families, &mut buffer)?;

        String::from_utf8(buffer).map_err(|e| {
            prometheus::Error::Msg(format!("metrics output is not valid UTF-8: {e}"))
        })
    }

    /// The registry this aggregator's series are registered in.
    pub fn registry(&self) -> &Registry {
        &self.registry
    }
}
