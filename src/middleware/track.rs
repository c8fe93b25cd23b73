//! Request tracking middleware
//!
//! Times every request through the rest of the handler chain and records
//! the outcome into [`RequestMetrics`], labeled by status code, method,
//! and request path.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::time::Instant;

use crate::metrics::RequestMetrics;

/// Middleware that records one observation per request.
///
/// Insert with [`axum::middleware::from_fn_with_state`], passing a
/// [`RequestMetrics`] handle as the state. The handle is the middleware's
/// own state, so the layer drops into any router regardless of that
/// router's state type:
///
/// ```no_run
/// use axum::{Router, middleware, routing::get};
/// use reqstat::metrics::{MetricsOpts, RequestMetrics};
/// use reqstat::middleware::track_requests;
///
/// let metrics = RequestMetrics::new("api", MetricsOpts::default()).unwrap();
/// let app: Router = Router::new()
///     .route("/", get(|| async { "hello" }))
///     .layer(middleware::from_fn_with_state(metrics, track_requests));
/// ```
///
/// The response passes through untouched: body, headers, and status are
/// exactly what the inner service produced, and panics or errors from the
/// inner service propagate unchanged. A handler that never sets a status
/// is recorded as 200, which is what Axum sends. Recording failures are
/// logged and dropped; they never surface to the client.
pub async fn track_requests(
    State(metrics): State<RequestMetrics>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let start = Instant::now();

    let response = next.run(request).await;

    let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
    if let Err(e) = metrics.record(response.status(), &method, &path, elapsed_ms) {
        tracing::error!(
            error = %e,
            method = %method,
            path,
            "failed to record request metrics"
        );
    }

    response
}
