//! Call API DTOs

use crate::application::call_service::DEFAULT_LIST_LIMIT;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Start call request
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct StartCallRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub participant: Option<String>,
}

/// Start call response
#[derive(Debug, Serialize, Deserialize)]
pub struct StartCallResponse {
    pub call_id: String,
    pub status: String,
}

/// Query parameters for listing calls
#[derive(Debug, Deserialize)]
pub struct ListCallsQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    DEFAULT_LIST_LIMIT
}

/// Append event request
#[derive(Debug, Serialize, Deserialize)]
pub struct AddEventRequest {
    pub call_id: String,
    #[serde(rename = "type")]
    pub event_type: String,
    #[serde(default)]
    pub text: Option<String>,
}

/// End call request
#[derive(Debug, Serialize, Deserialize)]
pub struct EndCallRequest {
    pub call_id: String,
}

/// `{"ok": true}`
#[derive(Debug, Serialize, Deserialize)]
pub struct OkResponse {
    pub ok: bool,
}

impl OkResponse {
    pub fn ok() -> Self {
        Self { ok: true }
    }
}

/// Top-level call fields holding timestamps
const CALL_TIMESTAMP_FIELDS: &[&str] = &["started_at", "ended_at", "updated_at"];

/// Render a stored call for listing
///
/// `_id` becomes a plain string and readable timestamps are re-rendered as
/// RFC 3339 text. Every other field passes through untouched, so records
/// written outside this service are listed as they are.
pub fn render_call(document: Value) -> Value {
    let mut call = match document {
        Value::Object(call) => call,
        other => return other,
    };

    if let Some(id) = call.get_mut("_id") {
        if !id.is_string() {
            *id = Value::String(id.to_string());
        }
    }

    for field in CALL_TIMESTAMP_FIELDS {
        if let Some(timestamp) = call.get_mut(*field) {
            normalize_timestamp(timestamp);
        }
    }

    if let Some(Value::Array(events)) = call.get_mut("events") {
        for event in events.iter_mut() {
            if let Some(timestamp) = event.get_mut("timestamp") {
                normalize_timestamp(timestamp);
            }
        }
    }

    Value::Object(call)
}

fn normalize_timestamp(value: &mut Value) {
    let parsed = value
        .as_str()
        .and_then(|text| DateTime::parse_from_rfc3339(text).ok());

    if let Some(timestamp) = parsed {
        *value = Value::String(timestamp.with_timezone(&Utc).to_rfc3339());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render_call_normalizes_ids_and_timestamps() {
        let rendered = render_call(json!({
            "_id": 42,
            "title": "standup",
            "started_at": "2026-10-19T10:00:00.5Z",
            "ended_at": null,
            "status": "active",
            "events": [{"type": "transcript", "timestamp": "2026-10-19T12:00:05+02:00"}]
        }));

        assert_eq!(rendered["_id"], "42");
        assert_eq!(rendered["started_at"], "2026-10-19T10:00:00.500+00:00");
        assert!(rendered["ended_at"].is_null());
        assert_eq!(rendered["events"][0]["timestamp"], "2026-10-19T10:00:05+00:00");
    }

    #[test]
    fn test_render_call_passes_unknown_shapes_through() {
        let rendered = render_call(json!({
            "_id": "abc123",
            "status": "on-hold",
            "started_at": "yesterday-ish",
            "recording_url": "s3://calls/abc123.wav",
            "events": [{"type": "status"}, "free text"]
        }));

        assert_eq!(rendered["_id"], "abc123");
        assert_eq!(rendered["status"], "on-hold");
        assert_eq!(rendered["started_at"], "yesterday-ish");
        assert_eq!(rendered["recording_url"], "s3://calls/abc123.wav");
        assert_eq!(rendered["events"], json!([{"type": "status"}, "free text"]));
    }

    #[test]
    fn test_add_event_request_reads_type_field() {
        let req: AddEventRequest = serde_json::from_value(json!({
            "call_id": "abc123",
            "type": "status"
        }))
        .unwrap();

        assert_eq!(req.event_type, "status");
        assert!(req.text.is_none());
    }

    #[test]
    fn test_list_query_default_limit() {
        let query: ListCallsQuery = serde_json::from_value(json!({})).unwrap();
        assert_eq!(query.limit, 20);
    }
}
