//! In-memory document store
//!
//! Same contract as the PostgreSQL store, kept in process. Used when the
//! `memory` backend is configured and by tests.

use super::{into_body, with_id};
use crate::domain::document::{DocumentFilter, DocumentStore, DocumentUpdate};
use crate::domain::shared::error::Result;
use crate::domain::shared::value_objects::DocumentId;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

struct StoredDocument {
    id: DocumentId,
    body: Map<String, Value>,
}

/// Document store backed by a map of collections
#[derive(Default)]
pub struct InMemoryDocumentStore {
    collections: RwLock<HashMap<String, Vec<StoredDocument>>>,
}

impl InMemoryDocumentStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for InMemoryDocumentStore {
    async fn create(&self, collection: &str, document: Value) -> Result<DocumentId> {
        let body = into_body(document)?;
        let id = DocumentId::new();

        self.collections
            .write()
            .await
            .entry(collection.to_string())
            .or_default()
            .push(StoredDocument { id, body });

        debug!("Created document {} in {}", id, collection);
        Ok(id)
    }

    async fn query(&self, collection: &str, filter: DocumentFilter, limit: i64) -> Result<Vec<Value>> {
        let limit = usize::try_from(limit).unwrap_or(0);
        let collections = self.collections.read().await;

        let documents = match collections.get(collection) {
            Some(documents) => documents,
            None => return Ok(Vec::new()),
        };

        Ok(documents
            .iter()
            .filter(|doc| filter.matches(&doc.body))
            .take(limit)
            .map(|doc| with_id(doc.id, doc.body.clone()))
            .collect())
    }

    async fn find_one(&self, collection: &str, id: DocumentId) -> Result<Option<Value>> {
        let collections = self.collections.read().await;

        Ok(collections
            .get(collection)
            .and_then(|documents| documents.iter().find(|doc| doc.id == id))
            .map(|doc| with_id(doc.id, doc.body.clone())))
    }

    async fn update_one(&self, collection: &str, id: DocumentId, update: DocumentUpdate) -> Result<u64> {
        let mut collections = self.collections.write().await;

        let document = collections
            .get_mut(collection)
            .and_then(|documents| documents.iter_mut().find(|doc| doc.id == id));

        match document {
            Some(doc) => {
                update.apply(&mut doc.body);
                debug!("Updated document {} in {}", id, collection);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn list_collections(&self) -> Result<Vec<String>> {
        let collections = self.collections.read().await;

        let mut names: Vec<String> = collections
            .iter()
            .filter(|(_, documents)| !documents.is_empty())
            .map(|(name, _)| name.clone())
            .collect();
        names.sort();
        Ok(names)
    }

    async fn close(&self) {
        debug!("In-memory document store closed");
    }
}
