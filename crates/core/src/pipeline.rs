use prodsearch_common::{ProdSearchError, Result};
use prodsearch_embed::TextEmbedder;
use tracing::debug;

use crate::chunker::TextChunker;
use crate::types::{ChunkDocument, Product};

/// Turns products into embedded chunk documents ready for storage
///
/// Owns the chunking configuration; the embedding collaborator is injected
/// per call so load and query paths share one handle.
#[derive(Debug, Clone)]
pub struct DocumentPipeline {
    chunker: TextChunker,
}

impl DocumentPipeline {
    pub fn new(chunk_size: usize, overlap: usize) -> Result<Self> {
        Ok(Self {
            chunker: TextChunker::new(chunk_size, overlap)?,
        })
    }

    pub fn chunker(&self) -> &TextChunker {
        &self.chunker
    }

    /// Build the stored documents for one product
    ///
    /// Chunks the description, embeds all chunk texts in one batch call
    /// (order-preserving) and attaches vectors positionally. A product
    /// with no description yields a single metadata-only document keyed
    /// on its name. An embedding failure is fatal for this product and
    /// carries its identity; retry or skip policy belongs to the caller.
    pub async fn build_chunk_documents(
        &self,
        product: &Product,
        embedder: &dyn TextEmbedder,
    ) -> Result<Vec<ChunkDocument>> {
        let description = product.description.as_deref().unwrap_or("");
        let chunks = self.chunker.chunk(description);

        if chunks.is_empty() {
            let vector = embedder.embed(&product.name).await.map_err(|e| {
                ProdSearchError::embedding(format!("product {}", product.id), e.to_string())
            })?;
            debug!("Product {} has no description, built fallback document", product.id);
            return Ok(vec![ChunkDocument::fallback(product, vector)]);
        }

        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let vectors = embedder.embed_batch(&texts).await.map_err(|e| {
            ProdSearchError::embedding(format!("product {}", product.id), e.to_string())
        })?;

        if vectors.len() != chunks.len() {
            return Err(ProdSearchError::embedding(
                format!("product {}", product.id),
                format!(
                    "embedder returned {} vectors for {} chunks",
                    vectors.len(),
                    chunks.len()
                ),
            ));
        }

        let documents = chunks
            .iter()
            .zip(vectors)
            .map(|(chunk, vector)| ChunkDocument::from_chunk(product, chunk, vector))
            .collect::<Vec<_>>();

        debug!(
            "Product {} -> {} chunk documents",
            product.id,
            documents.len()
        );
        Ok(documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    /// Deterministic embedder: vector encodes the input's char count
    struct StubEmbedder;

    #[async_trait]
    impl TextEmbedder for StubEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>> {
            Ok(vec![text.chars().count() as f32, 1.0, 2.0])
        }

        async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
            let mut vectors = Vec::with_capacity(texts.len());
            for text in texts {
                vectors.push(self.embed(text).await?);
            }
            Ok(vectors)
        }

        async fn test_connection(&self) -> Result<bool> {
            Ok(true)
        }
    }

    /// Embedder that always fails
    struct FailingEmbedder;

    #[async_trait]
    impl TextEmbedder for FailingEmbedder {
        async fn embed(&self, _text: &str) -> Result<Vec<f32>> {
            Err(ProdSearchError::network("embedding service down"))
        }

        async fn embed_batch(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>> {
            Err(ProdSearchError::network("embedding service down"))
        }

        async fn test_connection(&self) -> Result<bool> {
            Ok(false)
        }
    }

    fn product(id: &str, description: Option<&str>) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Product {}", id),
            url: Some("https://example.com/p".to_string()),
            brand: Some("Acme".to_string()),
            category: Some("Gadgets".to_string()),
            price: Some(99.0),
            market_price: Some(120.0),
            average_rating: Some(4.5),
            description: description.map(str::to_string),
        }
    }

    #[tokio::test]
    async fn test_documents_built_from_description_chunks() {
        let pipeline = DocumentPipeline::new(40, 10).unwrap();
        let p = product(
            "1",
            Some("First sentence about it. Second sentence follows. Third one ends here."),
        );

        let docs = pipeline
            .build_chunk_documents(&p, &StubEmbedder)
            .await
            .unwrap();

        assert!(docs.len() > 1);
        for (i, doc) in docs.iter().enumerate() {
            assert_eq!(doc.product_id, "1");
            assert_eq!(doc.chunk_id, i);
            assert!(doc.is_chunk);
            // Vector was attached to the matching chunk
            assert_eq!(doc.description_vector[0], doc.chunk_text.chars().count() as f32);
            // Dimensionality is constant across texts for one model
            assert_eq!(doc.description_vector.len(), 3);
        }
    }

    #[tokio::test]
    async fn test_missing_description_yields_fallback_document() {
        let pipeline = DocumentPipeline::new(300, 50).unwrap();

        for p in [product("2", None), product("3", Some("   "))] {
            let docs = pipeline
                .build_chunk_documents(&p, &StubEmbedder)
                .await
                .unwrap();

            assert_eq!(docs.len(), 1);
            assert!(!docs[0].is_chunk);
            assert_eq!(docs[0].chunk_text, p.name);
            assert_eq!(docs[0].chunk_id, 0);
        }
    }

    #[tokio::test]
    async fn test_embedding_failure_carries_product_identity() {
        let pipeline = DocumentPipeline::new(300, 50).unwrap();
        let p = product("42", Some("Some description text."));

        let err = pipeline
            .build_chunk_documents(&p, &FailingEmbedder)
            .await
            .unwrap_err();

        assert!(err.to_string().contains("product 42"));
    }

    #[tokio::test]
    async fn test_short_description_preview_has_no_ellipsis() {
        let pipeline = DocumentPipeline::new(300, 50).unwrap();
        let p = product("5", Some("Compact and light."));

        let docs = pipeline
            .build_chunk_documents(&p, &StubEmbedder)
            .await
            .unwrap();

        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].full_description.as_deref(), Some("Compact and light."));
    }
}
