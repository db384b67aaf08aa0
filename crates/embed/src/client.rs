use async_trait::async_trait;
use prodsearch_common::Result;
use reqwest::Client;
use tracing::{debug, info};

use crate::embedder::TextEmbedder;
use crate::types::{EmbedRequest, EmbedResponse};

/// Ollama embedding client
#[derive(Debug, Clone)]
pub struct OllamaEmbedder {
    base_url: String,
    model: String,
    client: Client,
}

impl OllamaEmbedder {
    /// Create new Ollama embedding client
    pub fn new(base_url: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into();
        let model = model.into();
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(120))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;

        info!("Ollama embedder initialized: {} ({})", base_url, model);
        Ok(Self {
            base_url,
            model,
            client,
        })
    }

    /// Generate embeddings with retry and exponential backoff
    async fn embed_with_retry(
        &self,
        texts: &[String],
        max_retries: u32,
    ) -> Result<Vec<Vec<f32>>> {
        let url = format!("{}/api/embed", self.base_url);

        debug!(
            "Generating embeddings - Model: {}, Batch size: {}",
            self.model,
            texts.len()
        );

        let request = EmbedRequest {
            model: self.model.clone(),
            input: texts.to_vec(),
        };

        let mut last_error = None;

        for attempt in 1..=max_retries {
            match self.try_embed(&url, &request).await {
                Ok(embeddings) => {
                    debug!(
                        "Received {} embeddings - Dimension: {}",
                        embeddings.len(),
                        embeddings.first().map(|e| e.len()).unwrap_or(0)
                    );
                    return Ok(embeddings);
                }
                Err(e) => {
                    last_error = Some(e);
                    if attempt < max_retries {
                        let delay = std::time::Duration::from_secs(2u64.pow(attempt - 1));
                        tracing::warn!(
                            "Embedding request failed (attempt {}/{}): {}. Retrying in {:?}...",
                            attempt,
                            max_retries,
                            last_error.as_ref().unwrap(),
                            delay
                        );
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| anyhow::anyhow!("All retries failed").into()))
    }

    /// Single attempt to generate embeddings
    async fn try_embed(&self, url: &str, request: &EmbedRequest) -> Result<Vec<Vec<f32>>> {
        let response = self
            .client
            .post(url)
            .json(&request)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to send embedding request: {}", e))?
            .error_for_status()
            .map_err(|e| anyhow::anyhow!("Ollama embedding API error: {}", e))?;

        let result: EmbedResponse = response
            .json()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to parse embedding response: {}", e))?;

        if result.embeddings.len() != request.input.len() {
            return Err(anyhow::anyhow!(
                "Embedding count mismatch: sent {} texts, received {} vectors",
                request.input.len(),
                result.embeddings.len()
            )
            .into());
        }

        if result.embeddings.iter().any(|e| e.is_empty()) {
            return Err(anyhow::anyhow!("Empty embedding from Ollama").into());
        }

        Ok(result.embeddings)
    }
}

#[async_trait]
impl TextEmbedder for OllamaEmbedder {
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let mut embeddings = self.embed_with_retry(&[text.to_string()], 3).await?;
        embeddings
            .pop()
            .ok_or_else(|| anyhow::anyhow!("Empty embedding response").into())
    }

    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        self.embed_with_retry(texts, 3).await
    }

    async fn test_connection(&self) -> Result<bool> {
        let url = format!("{}/api/tags", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| anyhow::anyhow!("Failed to connect to Ollama: {}", e))?;
        Ok(response.status().is_success())
    }
}
