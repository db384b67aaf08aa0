//! ProdSearch embedding integration
//!
//! Ollama embedding API client behind the `TextEmbedder` trait

mod client;
mod embedder;
mod types;

pub use client::OllamaEmbedder;
pub use embedder::TextEmbedder;
pub use types::{EmbedRequest, EmbedResponse};
