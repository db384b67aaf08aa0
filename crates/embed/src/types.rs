use serde::{Deserialize, Serialize};

/// Ollama embedding request (single text or batch)
///
/// The `/api/embed` endpoint accepts an array of inputs and returns one
/// embedding per input, in order.
#[derive(Debug, Clone, Serialize)]
pub struct EmbedRequest {
    /// Model name (e.g., "nomic-embed-text")
    pub model: String,

    /// Texts to embed
    pub input: Vec<String>,
}

/// Ollama embedding response
#[derive(Debug, Clone, Deserialize)]
pub struct EmbedResponse {
    /// One embedding per input text, order-preserving
    pub embeddings: Vec<Vec<f32>>,
}
