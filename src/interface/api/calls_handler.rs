//! Call API handlers

use super::call_dto::{
    render_call, AddEventRequest, EndCallRequest, ListCallsQuery, OkResponse, StartCallRequest,
    StartCallResponse,
};
use super::error::ApiError;
use super::metrics_handler::{record_call_ended, record_call_event, record_call_started};
use super::state::AppState;
use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Query, State,
    },
    Json,
};
use serde_json::Value;
use tracing::info;

/// Start a call
pub async fn start_call(
    State(state): State<AppState>,
    payload: Result<Json<StartCallRequest>, JsonRejection>,
) -> Result<Json<StartCallResponse>, ApiError> {
    let Json(req) = payload?;
    info!(
        "API: Starting call (title: {:?}, participant: {:?})",
        req.title, req.participant
    );

    let started = state
        .call_service
        .start_call(req.title, req.participant)
        .await?;
    record_call_started();

    info!("API: Started call {}", started.call_id);
    Ok(Json(StartCallResponse {
        call_id: started.call_id,
        status: started.status.as_str().to_string(),
    }))
}

/// List calls
pub async fn list_calls(
    State(state): State<AppState>,
    query: Result<Query<ListCallsQuery>, QueryRejection>,
) -> Result<Json<Vec<Value>>, ApiError> {
    let Query(query) = query?;
    info!("API: Listing calls (limit: {})", query.limit);

    let calls = state.call_service.list_calls(query.limit).await?;

    Ok(Json(calls.into_iter().map(render_call).collect()))
}

/// Append an event (transcript line or status update) to a call
pub async fn add_event(
    State(state): State<AppState>,
    payload: Result<Json<AddEventRequest>, JsonRejection>,
) -> Result<Json<OkResponse>, ApiError> {
    let Json(req) = payload?;
    info!("API: Adding {} event to call {}", req.event_type, req.call_id);

    let event = state
        .call_service
        .append_event(&req.call_id, req.event_type, req.text)
        .await?;
    record_call_event(&event.event_type);

    Ok(Json(OkResponse::ok()))
}

/// End a call
pub async fn end_call(
    State(state): State<AppState>,
    payload: Result<Json<EndCallRequest>, JsonRejection>,
) -> Result<Json<OkResponse>, ApiError> {
    let Json(req) = payload?;
    info!("API: Ending call {}", req.call_id);

    let ended = state.call_service.end_call(&req.call_id).await?;
    record_call_ended(ended.duration_seconds);

    info!(
        "API: Ended call {} (duration: {:?}s)",
        req.call_id, ended.duration_seconds
    );
    Ok(Json(OkResponse::ok()))
}
