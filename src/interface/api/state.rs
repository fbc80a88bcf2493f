//! Shared handler state

use crate::application::CallService;
use crate::config::DatabaseConfig;
use crate::domain::document::DocumentStore;
use std::sync::Arc;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub call_service: Arc<CallService>,
    pub store: Option<Arc<dyn DocumentStore>>,
    pub database_url_set: bool,
    pub database_name_set: bool,
}

impl AppState {
    pub fn new(store: Option<Arc<dyn DocumentStore>>, database: &DatabaseConfig) -> Self {
        Self {
            call_service: Arc::new(CallService::new(store.clone())),
            store,
            database_url_set: database.url.is_some(),
            database_name_set: database.name.is_some(),
        }
    }
}
