//! Document store port
//!
//! Records are persisted as JSON documents grouped into named collections.
//! The trait is defined here and implemented in the infrastructure layer
//! (PostgreSQL JSONB or in-memory).

use crate::domain::shared::error::Result;
use crate::domain::shared::value_objects::DocumentId;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};

/// A record type stored in its own collection
pub trait Document: Serialize + DeserializeOwned {
    /// Model name reported to the schema viewer
    const MODEL: &'static str;

    /// Collection the records live in
    const COLLECTION: &'static str;
}

/// Equality filter on top-level document fields; empty matches everything
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentFilter {
    fields: Map<String, Value>,
}

impl DocumentFilter {
    /// Filter matching every document
    pub fn all() -> Self {
        Self::default()
    }

    /// Require `field` to equal `value`
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn matches(&self, document: &Map<String, Value>) -> bool {
        self.fields
            .iter()
            .all(|(field, expected)| document.get(field) == Some(expected))
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }
}

/// Changes applied atomically to a single document
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentUpdate {
    set: Map<String, Value>,
    push: Vec<(String, Value)>,
}

impl DocumentUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `value` to `field`, replacing what was there
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set.insert(field.into(), value.into());
        self
    }

    /// Append `value` to the array stored in `field`, creating it if missing
    pub fn push(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.push.push((field.into(), value.into()));
        self
    }

    pub fn assignments(&self) -> &Map<String, Value> {
        &self.set
    }

    pub fn appends(&self) -> &[(String, Value)] {
        &self.push
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty() && self.push.is_empty()
    }

    /// Apply the update to an in-memory document body
    pub fn apply(&self, document: &mut Map<String, Value>) {
        for (field, value) in &self.push {
            match document.get_mut(field) {
                Some(Value::Array(items)) => items.push(value.clone()),
                _ => {
                    document.insert(field.clone(), Value::Array(vec![value.clone()]));
                }
            }
        }
        for (field, value) in &self.set {
            document.insert(field.clone(), value.clone());
        }
    }
}

/// Document store gateway
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Insert a document and return its newly assigned id
    async fn create(&self, collection: &str, document: Value) -> Result<DocumentId>;

    /// Up to `limit` documents matching `filter`, in insertion order
    async fn query(&self, collection: &str, filter: DocumentFilter, limit: i64) -> Result<Vec<Value>>;

    /// Fetch one document by id
    async fn find_one(&self, collection: &str, id: DocumentId) -> Result<Option<Value>>;

    /// Apply `update` to one document; returns the number of documents matched
    async fn update_one(&self, collection: &str, id: DocumentId, update: DocumentUpdate) -> Result<u64>;

    /// Names of the collections holding at least one document
    async fn list_collections(&self) -> Result<Vec<String>>;

    /// Release the underlying connection
    async fn close(&self);
}
