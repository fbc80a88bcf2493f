//! Service info, store diagnostics and the schema listing

use super::state::AppState;
use crate::domain::registry::declared_models;
use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::info;

/// Error text in diagnostics is cut to this many characters
const DIAGNOSTIC_ERROR_CHARS: usize = 80;

/// Maximum number of collection names reported by `/test`
const DIAGNOSTIC_COLLECTIONS: usize = 10;

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Store connectivity report
#[derive(Debug, Serialize, Deserialize)]
pub struct DatabaseDiagnostics {
    pub backend: String,
    pub database: String,
    pub database_url: Option<String>,
    pub database_name: Option<String>,
    pub connection_status: String,
    pub collections: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SchemaResponse {
    pub models: Vec<String>,
    pub collections: BTreeMap<String, String>,
}

pub async fn root() -> Json<MessageResponse> {
    Json(MessageResponse {
        message: "NEOSERVICE backend is running".to_string(),
    })
}

/// Describe store connectivity without failing the request
pub async fn test_database(State(state): State<AppState>) -> Json<DatabaseDiagnostics> {
    info!("API: Running database diagnostics");

    let mut report = DatabaseDiagnostics {
        backend: "✅ Running".to_string(),
        database: "❌ Not Available".to_string(),
        database_url: None,
        database_name: None,
        connection_status: "Not Connected".to_string(),
        collections: Vec::new(),
    };

    match &state.store {
        Some(store) => {
            report.database = "✅ Available".to_string();
            report.database_url = Some(set_marker(state.database_url_set));
            report.database_name = Some(set_marker(state.database_name_set));

            match store.list_collections().await {
                Ok(collections) => {
                    report.collections = collections.into_iter().take(DIAGNOSTIC_COLLECTIONS).collect();
                    report.database = "✅ Connected & Working".to_string();
                    report.connection_status = "Connected".to_string();
                }
                Err(e) => {
                    report.database = format!("⚠️ Connected but Error: {}", truncate(e.message()));
                }
            }
        }
        None => {
            report.database = "⚠️ Available but not initialized".to_string();
        }
    }

    Json(report)
}

/// Declared model names for the schema viewer
pub async fn schema() -> Json<SchemaResponse> {
    let models = declared_models();

    Json(SchemaResponse {
        models: models.iter().map(|m| m.name.to_string()).collect(),
        collections: models
            .iter()
            .filter_map(|m| m.collection.map(|c| (m.name.to_string(), c.to_string())))
            .collect(),
    })
}

fn set_marker(is_set: bool) -> String {
    let marker = if is_set { "✅ Set" } else { "❌ Not Set" };
    marker.to_string()
}

fn truncate(message: &str) -> String {
    message.chars().take(DIAGNOSTIC_ERROR_CHARS).collect()
}
