//! Call events
//!
//! An event is a timestamped occurrence within a call, such as a transcript
//! segment or a status update. Events are embedded in the owning call and
//! have no identity of their own.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single event within a call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CallEvent {
    /// Owning call id (plain string reference)
    pub call_id: String,

    /// Free-form tag, e.g. `transcript` or `status`
    #[serde(rename = "type")]
    pub event_type: String,

    /// Transcript text when `event_type` is `transcript`
    #[serde(default)]
    pub text: Option<String>,

    pub timestamp: DateTime<Utc>,
}

impl CallEvent {
    /// Model name reported to the schema viewer
    pub const MODEL: &'static str = "CallEvent";

    pub const TRANSCRIPT: &'static str = "transcript";
    pub const STATUS: &'static str = "status";

    /// Create an event stamped with the current time
    pub fn new(call_id: String, event_type: String, text: Option<String>) -> Self {
        Self {
            call_id,
            event_type,
            text,
            timestamp: Utc::now(),
        }
    }

    pub fn is_transcript(&self) -> bool {
        self.event_type == Self::TRANSCRIPT
    }
}
