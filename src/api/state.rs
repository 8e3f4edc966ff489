use std::sync::Arc;

use crate::services::{CatalogAssistant, IngestionPipeline};
use crate::store::{InMemoryStore, MediaStore};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MediaStore>,
    pub assistant: Arc<dyn CatalogAssistant>,
    pub pipeline: Arc<IngestionPipeline>,
}

impl AppState {
    pub fn new(store: Arc<dyn MediaStore>, assistant: Arc<dyn CatalogAssistant>) -> Self {
        let pipeline = Arc::new(IngestionPipeline::new(store.clone(), assistant.clone()));
        Self {
            store,
            assistant,
            pipeline,
        }
    }

    /// State over the in-memory store; also what the integration tests run on
    pub fn in_memory(assistant: Arc<dyn CatalogAssistant>) -> Self {
        Self::new(Arc::new(InMemoryStore::new()), assistant)
    }
}
