//! Prometheus metrics handler

use axum::{
    extract::{MatchedPath, Request},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Response},
};
use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};
use std::time::Instant;

const DURATION_BUCKETS: &[f64] = &[0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0];

/// Initialize the Prometheus metrics exporter and install it as the global recorder
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full("http_request_duration_seconds".to_string()),
            DURATION_BUCKETS,
        )?
        .set_buckets_for_metric(
            Matcher::Full("call_duration_seconds".to_string()),
            &[5.0, 15.0, 30.0, 60.0, 300.0, 900.0, 1800.0, 3600.0],
        )?
        .install_recorder()?;

    // Describe metrics
    describe_counter!(
        "http_requests_total",
        "Total number of HTTP requests received"
    );
    describe_histogram!(
        "http_request_duration_seconds",
        "HTTP request duration in seconds"
    );
    describe_counter!("calls_started_total", "Total number of calls started");
    describe_counter!("calls_ended_total", "Total number of calls ended");
    describe_counter!(
        "call_events_appended_total",
        "Total number of events appended to calls"
    );
    describe_histogram!("call_duration_seconds", "Duration of ended calls in seconds");

    Ok(handle)
}

/// HTTP metrics handler
pub async fn metrics_handler(
    axum::extract::State(prometheus_handle): axum::extract::State<PrometheusHandle>,
) -> Response {
    let metrics = prometheus_handle.render();
    (StatusCode::OK, metrics).into_response()
}

/// Middleware recording request count and latency per matched route
pub async fn track_metrics(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    let path = match req.extensions().get::<MatchedPath>() {
        Some(matched) => matched.as_str().to_string(),
        None => req.uri().path().to_string(),
    };

    let response = next.run(req).await;

    record_http_request(&method, &path, response.status().as_u16(), start.elapsed());
    response
}

/// Record HTTP request
pub fn record_http_request(method: &str, path: &str, status: u16, duration: std::time::Duration) {
    counter!("http_requests_total", "method" => method.to_string(), "path" => path.to_string(), "status" => status.to_string())
        .increment(1);
    histogram!(
        "http_request_duration_seconds",
        "method" => method.to_string(),
        "path" => path.to_string()
    )
    .record(duration.as_secs_f64());
}

pub fn record_call_started() {
    counter!("calls_started_total").increment(1);
}

pub fn record_call_event(event_type: &str) {
    counter!("call_events_appended_total", "type" => event_type.to_string()).increment(1);
}

pub fn record_call_ended(duration_seconds: Option<i64>) {
    counter!("calls_ended_total").increment(1);
    if let Some(seconds) = duration_seconds {
        histogram!("call_duration_seconds").record(seconds.max(0) as f64);
    }
}
