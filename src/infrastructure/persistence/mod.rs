//! Persistence implementations

pub mod memory;
#[cfg(feature = "postgres")]
pub mod database;
#[cfg(feature = "postgres")]
pub mod document_repository;

pub use memory::InMemoryDocumentStore;
#[cfg(feature = "postgres")]
pub use database::{create_pool, run_migrations};
#[cfg(feature = "postgres")]
pub use document_repository::PgDocumentStore;

use crate::config::{StoreBackend, StoreConfig};
use crate::domain::document::DocumentStore;
use crate::domain::shared::error::DomainError;
use crate::domain::shared::error::Result;
use crate::domain::shared::value_objects::DocumentId;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Construct the configured store, or `None` when it cannot be initialized
///
/// A missing store is not fatal: the service still starts, `/test` reports
/// the problem, and store-backed endpoints fail until it is fixed.
pub async fn open_store(config: &StoreConfig) -> Option<Arc<dyn DocumentStore>> {
    match config.backend {
        StoreBackend::Memory => {
            info!("Using in-memory document store");
            Some(Arc::new(InMemoryDocumentStore::new()))
        }
        StoreBackend::Postgres => open_postgres(config).await,
    }
}

#[cfg(feature = "postgres")]
async fn open_postgres(config: &StoreConfig) -> Option<Arc<dyn DocumentStore>> {
    if config.database.url.is_none() {
        warn!("DATABASE_URL is not set; document store not initialized");
        return None;
    }

    let pool = match create_pool(&config.database).await {
        Ok(pool) => pool,
        Err(e) => {
            error!("Failed to connect to database: {}", e);
            return None;
        }
    };

    if let Err(e) = run_migrations(&pool).await {
        error!("Failed to run database migrations: {}", e);
        pool.close().await;
        return None;
    }

    info!("PostgreSQL document store initialized");
    Some(Arc::new(PgDocumentStore::new(pool)))
}

#[cfg(not(feature = "postgres"))]
async fn open_postgres(_config: &StoreConfig) -> Option<Arc<dyn DocumentStore>> {
    warn!("Built without the postgres feature; document store not initialized");
    None
}

/// Check a document is a JSON object and drop any caller-supplied `_id`
pub(crate) fn into_body(document: Value) -> Result<Map<String, Value>> {
    match document {
        Value::Object(mut body) => {
            body.remove("_id");
            Ok(body)
        }
        other => Err(DomainError::ValidationError(format!(
            "document must be a JSON object, got {}",
            json_type(&other)
        ))),
    }
}

/// Render a stored body with its id under `_id`
pub(crate) fn with_id(id: DocumentId, mut body: Map<String, Value>) -> Value {
    body.insert("_id".to_string(), Value::String(id.to_string()));
    Value::Object(body)
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
