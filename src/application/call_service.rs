//! Call lifecycle use cases: start, list, append event, end

use crate::domain::call::{elapsed_seconds, Call, CallEvent, CallStatus};
use crate::domain::document::{Document, DocumentFilter, DocumentStore, DocumentUpdate};
use crate::domain::shared::error::DomainError;
use crate::domain::shared::error::Result;
use crate::domain::shared::value_objects::DocumentId;
use chrono::{DateTime, Utc};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// Default number of calls returned by a listing
pub const DEFAULT_LIST_LIMIT: i64 = 20;

/// Result of starting a call
#[derive(Debug, Clone, PartialEq)]
pub struct StartedCall {
    pub call_id: String,
    pub status: CallStatus,
}

/// Result of ending a call
#[derive(Debug, Clone, PartialEq)]
pub struct EndedCall {
    pub ended_at: DateTime<Utc>,
    pub duration_seconds: Option<i64>,
}

/// Call lifecycle service
///
/// Holds the store handle constructed at startup; `None` means the store was
/// never initialized and every operation fails with `StoreUnavailable`.
pub struct CallService {
    store: Option<Arc<dyn DocumentStore>>,
}

impl CallService {
    pub fn new(store: Option<Arc<dyn DocumentStore>>) -> Self {
        Self { store }
    }

    fn store(&self) -> Result<&dyn DocumentStore> {
        self.store
            .as_deref()
            .ok_or_else(|| DomainError::StoreUnavailable("Database not available".to_string()))
    }

    /// Persist a new active call
    pub async fn start_call(
        &self,
        title: Option<String>,
        participant: Option<String>,
    ) -> Result<StartedCall> {
        let store = self.store()?;
        let call = Call::new(title, participant);
        let document = serde_json::to_value(&call)
            .map_err(|e| DomainError::Internal(format!("Failed to serialize call: {}", e)))?;

        let id = store.create(Call::COLLECTION, document).await?;
        debug!("Started call {}", id);

        Ok(StartedCall {
            call_id: id.to_string(),
            status: call.status,
        })
    }

    /// Up to `limit` stored call documents in store order
    ///
    /// Documents are returned as stored; records written by other tools need
    /// not match the `Call` model.
    pub async fn list_calls(&self, limit: i64) -> Result<Vec<Value>> {
        if limit < 0 {
            return Err(DomainError::ValidationError(format!(
                "limit must be greater than or equal to 0, got {}",
                limit
            )));
        }

        let store = self.store()?;
        store.query(Call::COLLECTION, DocumentFilter::all(), limit).await
    }

    /// Append an event to a call and bump its `updated_at`
    ///
    /// No existence check is made: an id that matches no call still succeeds.
    pub async fn append_event(
        &self,
        call_id: &str,
        event_type: String,
        text: Option<String>,
    ) -> Result<CallEvent> {
        let store = self.store()?;
        let id = DocumentId::parse(call_id)?;
        let event = CallEvent::new(id.to_string(), event_type, text);

        let update = DocumentUpdate::new()
            .push("events", to_json(&event)?)
            .set("updated_at", to_json(&event.timestamp)?);

        let matched = store.update_one(Call::COLLECTION, id, update).await?;
        if matched == 0 {
            warn!("Event appended to unknown call {}; no record updated", call_id);
        }

        Ok(event)
    }

    /// Mark a call ended now and record its duration
    pub async fn end_call(&self, call_id: &str) -> Result<EndedCall> {
        let store = self.store()?;
        let id = DocumentId::parse(call_id)?;

        let document = store
            .find_one(Call::COLLECTION, id)
            .await?
            .ok_or_else(|| DomainError::NotFound("Call not found".to_string()))?;

        let ended_at = Utc::now();
        let duration_seconds = elapsed_seconds(stored_started_at(&document), ended_at);

        let update = DocumentUpdate::new()
            .set("status", CallStatus::Ended.as_str())
            .set("ended_at", to_json(&ended_at)?)
            .set("duration_seconds", duration_seconds);

        store.update_one(Call::COLLECTION, id, update).await?;

        Ok(EndedCall {
            ended_at,
            duration_seconds,
        })
    }
}

/// The stored start time, if present and readable as a timestamp
fn stored_started_at(document: &Value) -> Option<DateTime<Utc>> {
    document
        .get("started_at")
        .and_then(|value| serde_json::from_value(value.clone()).ok())
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<Value> {
    serde_json::to_value(value).map_err(|e| DomainError::Internal(e.to_string()))
}
