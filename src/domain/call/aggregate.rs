//! Call record
//!
//! A call is created active, collects events, and is moved to ended by the
//! end operation. Ending an already ended call recomputes its end fields.

use crate::domain::call::event::CallEvent;
use crate::domain::call::value_object::CallStatus;
use crate::domain::document::Document;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Voice-call session record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Call {
    /// Store-assigned id; absent until the record has been persisted
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    pub title: Option<String>,

    /// Set at creation. Records written out-of-band may lack it
    #[serde(default)]
    pub started_at: Option<DateTime<Utc>>,

    pub ended_at: Option<DateTime<Utc>>,

    pub duration_seconds: Option<i64>,

    #[serde(default)]
    pub status: CallStatus,

    pub participant: Option<String>,

    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,

    #[serde(default)]
    pub events: Vec<CallEvent>,
}

impl Document for Call {
    const MODEL: &'static str = "Call";
    const COLLECTION: &'static str = "call";
}

impl Call {
    /// Create a new active call starting now
    pub fn new(title: Option<String>, participant: Option<String>) -> Self {
        Self {
            id: None,
            title,
            started_at: Some(Utc::now()),
            ended_at: None,
            duration_seconds: None,
            status: CallStatus::Active,
            participant,
            updated_at: None,
            events: Vec::new(),
        }
    }

    pub fn is_active(&self) -> bool {
        self.status == CallStatus::Active
    }
}

/// Whole seconds between `started_at` and `ended_at`, truncated toward zero
pub fn elapsed_seconds(started_at: Option<DateTime<Utc>>, ended_at: DateTime<Utc>) -> Option<i64> {
    started_at.map(|started| (ended_at - started).num_seconds())
}
