use prodsearch_common::AppConfig;
use prodsearch_embed::TextEmbedder;
use prodsearch_store::VectorStore;
use std::sync::Arc;

/// Shared application state
///
/// Collaborator handles are constructed by the application layer and
/// injected here; the server only borrows them for the process lifetime.
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,

    /// Embedding collaborator (shared between load and query paths)
    pub embedder: Arc<dyn TextEmbedder>,

    /// Vector storage collaborator
    pub store: Arc<dyn VectorStore>,
}

impl AppState {
    /// Create new application state
    pub fn new(
        config: AppConfig,
        embedder: Arc<dyn TextEmbedder>,
        store: Arc<dyn VectorStore>,
    ) -> Self {
        Self {
            config,
            embedder,
            store,
        }
    }
}
