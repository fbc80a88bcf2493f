//! Call value objects

use serde::{Deserialize, Serialize};
use std::fmt;

/// Call status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallStatus {
    /// Call in progress
    #[default]
    Active,
    /// Call ended by the end operation
    Ended,
    /// Declared for stored records; no operation sets it
    Failed,
}

impl CallStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CallStatus::Active => "active",
            CallStatus::Ended => "ended",
            CallStatus::Failed => "failed",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "active" => Some(CallStatus::Active),
            "ended" => Some(CallStatus::Ended),
            "failed" => Some(CallStatus::Failed),
            _ => None,
        }
    }
}

impl fmt::Display for CallStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
