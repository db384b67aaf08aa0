use async_trait::async_trait;
use prodsearch_common::Result;
use prodsearch_core::{ChunkDocument, SearchHit};
use serde::{Deserialize, Serialize};

/// Chunk collection statistics
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionStats {
    /// Total chunk documents stored
    pub total_chunks: u64,

    /// Distinct products represented
    pub total_products: u64,

    /// Mean chunks per product
    pub average_chunks_per_product: f64,

    /// Largest chunk count for any one product
    pub max_chunks_per_product: u64,
}

/// Common trait for vector-search storage collaborators
///
/// The store owns nearest-neighbor search; callers supply query vectors
/// and consume ranked chunk-level hits. No retry or partial-state cleanup
/// happens here; a failure surfaces as a storage error for the caller to
/// handle.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Insert a batch of chunk documents, returns the inserted count
    async fn insert_many(&self, documents: &[ChunkDocument]) -> Result<usize>;

    /// Remove every document in the collection, returns the deleted count
    async fn delete_all(&self) -> Result<u64>;

    /// Ranked nearest neighbors of `query_vector`
    ///
    /// The store examines `num_candidates` approximate neighbors before
    /// truncating to `limit` hits, highest similarity first.
    async fn nearest_neighbors(
        &self,
        query_vector: &[f32],
        num_candidates: usize,
        limit: usize,
    ) -> Result<Vec<SearchHit>>;

    /// Collection-level statistics for the stats endpoint
    async fn collection_stats(&self) -> Result<CollectionStats>;
}
