//! ProdSearch vector storage
//!
//! `VectorStore` trait over the storage collaborator plus the MongoDB
//! Atlas Data API implementation

mod atlas;
mod store;

pub use atlas::AtlasVectorStore;
pub use store::{CollectionStats, VectorStore};
