use futures::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use prodsearch_common::{AppConfig, Result};
use prodsearch_core::{ChunkDocument, DocumentPipeline, Product};
use prodsearch_embed::TextEmbedder;
use prodsearch_store::VectorStore;
use std::sync::Arc;
use tracing::{info, warn};

/// Products chunked and embedded concurrently (order-preserving)
const EMBED_CONCURRENCY: usize = 4;

/// Documents buffered before one insertMany call
const INSERT_BATCH: usize = 100;

/// Bulk load outcome
#[derive(Debug)]
pub struct LoadSummary {
    pub products: usize,
    pub documents: usize,
    pub skipped: usize,
}

/// Read the product dataset, clear the collection and rebuild it with
/// embedded chunk documents
///
/// A product whose embedding fails is logged and skipped; the rest of the
/// load continues. Storage failures abort the load.
pub async fn load_products(
    config: &AppConfig,
    embedder: Arc<dyn TextEmbedder>,
    store: Arc<dyn VectorStore>,
) -> Result<LoadSummary> {
    let raw = std::fs::read_to_string(&config.data_path)?;
    let products: Vec<Product> = serde_json::from_str(&raw)?;
    let pipeline = DocumentPipeline::new(config.chunk_size, config.chunk_overlap)?;

    info!(
        "Loading {} products from {}",
        products.len(),
        config.data_path.display()
    );

    // Clear old data to avoid duplicates on reload
    let deleted = store.delete_all().await?;
    info!("Cleared {} existing documents", deleted);

    let bar = ProgressBar::new(products.len() as u64);
    bar.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} products ({eta})",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );

    let mut buffer: Vec<ChunkDocument> = Vec::new();
    let mut documents = 0usize;
    let mut skipped = 0usize;

    // Each product's chunking/embedding is independent, so a few run in
    // flight at once; results come back in product order.
    let mut results = futures::stream::iter(products.iter().map(|product| {
        let pipeline = &pipeline;
        let embedder = Arc::clone(&embedder);
        async move {
            let built = pipeline
                .build_chunk_documents(product, embedder.as_ref())
                .await;
            (product.id.clone(), built)
        }
    }))
    .buffered(EMBED_CONCURRENCY);

    while let Some((product_id, built)) = results.next().await {
        bar.inc(1);
        match built {
            Ok(docs) => {
                documents += docs.len();
                buffer.extend(docs);
                if buffer.len() >= INSERT_BATCH {
                    store.insert_many(&buffer).await?;
                    buffer.clear();
                }
            }
            Err(e) => {
                warn!("Skipping product {}: {}", product_id, e);
                skipped += 1;
            }
        }
    }

    if !buffer.is_empty() {
        store.insert_many(&buffer).await?;
    }
    bar.finish();

    let summary = LoadSummary {
        products: products.len(),
        documents,
        skipped,
    };
    info!(
        "Load complete: {} products -> {} chunk documents ({} skipped)",
        summary.products, summary.documents, summary.skipped
    );

    Ok(summary)
}
