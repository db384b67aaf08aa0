//! ProdSearch core
//!
//! Description chunking, chunk document construction and query-time
//! result aggregation. Everything here is a pure transformation except
//! the pipeline's call out to the injected embedding collaborator.

pub mod aggregate;
pub mod chunker;
pub mod pipeline;
pub mod text;
pub mod types;

pub use aggregate::aggregate_hits;
pub use chunker::{TextChunker, DEFAULT_CHUNK_SIZE, DEFAULT_OVERLAP};
pub use pipeline::DocumentPipeline;
pub use types::{AggregatedProduct, Chunk, ChunkDocument, Product, SearchHit};
