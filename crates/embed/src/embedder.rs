use async_trait::async_trait;
use prodsearch_common::Result;

/// Common trait for embedding collaborators
///
/// Vector dimensionality is fixed per model instance and must match
/// between load time and query time, so the same handle is injected into
/// both paths.
#[async_trait]
pub trait TextEmbedder: Send + Sync {
    /// Generate an embedding for a single text
    async fn embed(&self, text: &str) -> Result<Vec<f32>>;

    /// Generate embeddings for many texts in one call
    ///
    /// The returned vectors correspond to the inputs positionally.
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Test connection/availability
    async fn test_connection(&self) -> Result<bool>;
}
