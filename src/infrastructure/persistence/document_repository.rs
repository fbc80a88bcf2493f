//! PostgreSQL implementation of the document store
//!
//! Documents live in one JSONB table keyed by `(collection, id)`; `seq`
//! preserves insertion order. Updates are single statements, so a push and
//! its accompanying assignments land atomically.

use super::{into_body, with_id};
use crate::domain::document::{DocumentFilter, DocumentStore, DocumentUpdate};
use crate::domain::shared::error::DomainError;
use crate::domain::shared::error::Result;
use crate::domain::shared::value_objects::DocumentId;
use async_trait::async_trait;
use serde_json::{Map, Value};
use sqlx::types::Json;
use sqlx::{FromRow, PgPool};
use tracing::{debug, error};
use uuid::Uuid;

#[derive(FromRow)]
struct DocumentRow {
    id: Uuid,
    body: Json<Map<String, Value>>,
}

impl From<DocumentRow> for Value {
    fn from(r: DocumentRow) -> Self {
        with_id(DocumentId::from_uuid(r.id), r.body.0)
    }
}

pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn db_error(action: &str, e: sqlx::Error) -> DomainError {
    error!("Failed to {}: {}", action, e);
    DomainError::Store(format!("Database error: {}", e))
}

/// Build the `UPDATE` statement for `update`
///
/// `$1` is the collection and `$2` the id. Each push takes two parameters
/// (field name, value), then the merged assignments take one. Each push
/// reads the array from the body built by the pushes before it.
fn update_statement(update: &DocumentUpdate) -> String {
    let mut body = String::from("body");
    let mut param = 3;

    for _ in update.appends() {
        body = format!(
            "jsonb_set({body}, ARRAY[${f}::text], \
             COALESCE(({body}) -> ${f}::text, '[]'::jsonb) || jsonb_build_array(${v}::jsonb), true)",
            body = body,
            f = param,
            v = param + 1,
        );
        param += 2;
    }

    if !update.assignments().is_empty() {
        body = format!("{} || ${}::jsonb", body, param);
    }

    format!(
        "UPDATE documents SET body = {}, updated_at = NOW() WHERE collection = $1 AND id = $2",
        body
    )
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    async fn create(&self, collection: &str, document: Value) -> Result<DocumentId> {
        let body = into_body(document)?;
        let id = DocumentId::new();
        debug!("Creating document in {}", collection);

        sqlx::query("INSERT INTO documents (id, collection, body) VALUES ($1, $2, $3)")
            .bind(id.as_uuid())
            .bind(collection)
            .bind(Json(body))
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("create document", e))?;

        debug!("Document created successfully: {}", id);
        Ok(id)
    }

    async fn query(&self, collection: &str, filter: DocumentFilter, limit: i64) -> Result<Vec<Value>> {
        debug!("Querying {} with filter: {:?} (limit: {})", collection, filter, limit);

        let rows: Vec<DocumentRow> = if filter.is_empty() {
            sqlx::query_as::<_, DocumentRow>(
                r#"
                SELECT id, body
                FROM documents
                WHERE collection = $1
                ORDER BY seq
                LIMIT $2
                "#,
            )
            .bind(collection)
            .bind(limit.max(0))
            .fetch_all(&self.pool)
            .await
        } else {
            sqlx::query_as::<_, DocumentRow>(
                r#"
                SELECT id, body
                FROM documents
                WHERE collection = $1 AND body @> $2
                ORDER BY seq
                LIMIT $3
                "#,
            )
            .bind(collection)
            .bind(Json(filter.to_value()))
            .bind(limit.max(0))
            .fetch_all(&self.pool)
            .await
        }
        .map_err(|e| db_error("query documents", e))?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn find_one(&self, collection: &str, id: DocumentId) -> Result<Option<Value>> {
        debug!("Getting document {} from {}", id, collection);

        let row = sqlx::query_as::<_, DocumentRow>(
            "SELECT id, body FROM documents WHERE collection = $1 AND id = $2",
        )
        .bind(collection)
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| db_error("get document", e))?;

        Ok(row.map(Into::into))
    }

    async fn update_one(&self, collection: &str, id: DocumentId, update: DocumentUpdate) -> Result<u64> {
        debug!("Updating document {} in {}", id, collection);

        let sql = update_statement(&update);
        let mut query = sqlx::query(&sql).bind(collection).bind(id.as_uuid());

        for (field, value) in update.appends() {
            query = query.bind(field.as_str()).bind(Json(value));
        }
        if !update.assignments().is_empty() {
            query = query.bind(Json(update.assignments()));
        }

        let result = query
            .execute(&self.pool)
            .await
            .map_err(|e| db_error("update document", e))?;

        debug!("Update matched {} document(s)", result.rows_affected());
        Ok(result.rows_affected())
    }

    async fn list_collections(&self) -> Result<Vec<String>> {
        sqlx::query_scalar::<_, String>("SELECT DISTINCT collection FROM documents ORDER BY collection")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_error("list collections", e))
    }

    async fn close(&self) {
        self.pool.close().await;
        debug!("Database connection pool closed");
    }
}
