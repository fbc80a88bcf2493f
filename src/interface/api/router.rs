//! API Router configuration

use super::calls_handler::{add_event, end_call, list_calls, start_call};
use super::metrics_handler::{metrics_handler, track_metrics};
use super::state::AppState;
use super::system_handler::{root, schema, test_database};
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Build the API router
pub fn build_router(state: AppState, prometheus_handle: PrometheusHandle) -> Router {
    // Service info and diagnostics
    let system_routes = Router::new()
        .route("/", get(root))
        .route("/test", get(test_database))
        .route("/schema", get(schema));

    // Call lifecycle routes
    let call_routes = Router::new()
        .route("/api/calls", post(start_call).get(list_calls))
        .route("/api/calls/event", post(add_event))
        .route("/api/calls/end", post(end_call));

    // Metrics route (separate state)
    let metrics_routes = Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(prometheus_handle);

    // Combine routes with state
    Router::new()
        .merge(system_routes)
        .merge(call_routes)
        .route_layer(middleware::from_fn(track_metrics))
        .with_state(state)
        .merge(metrics_routes)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}
