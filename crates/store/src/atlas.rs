use async_trait::async_trait;
use prodsearch_common::{AppConfig, ProdSearchError, Result};
use prodsearch_core::{ChunkDocument, SearchHit};
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, info};

use crate::store::{CollectionStats, VectorStore};

/// MongoDB Atlas vector store over the Data API
///
/// Wraps the Data API's `insertMany`, `deleteMany` and `aggregate`
/// actions; nearest-neighbor search runs as a `$vectorSearch` aggregation
/// stage against the configured Atlas search index.
#[derive(Debug, Clone)]
pub struct AtlasVectorStore {
    api_url: String,
    api_key: String,
    data_source: String,
    database: String,
    collection: String,
    vector_index: String,
    client: Client,
}

impl AtlasVectorStore {
    /// Create a store handle from configuration
    pub fn new(config: &AppConfig) -> Result<Self> {
        if config.atlas_api_key.is_empty() {
            return Err(ProdSearchError::config("Atlas API key is not set"));
        }

        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;

        info!(
            "Atlas vector store initialized: {}/{} (index: {})",
            config.atlas_database, config.atlas_collection, config.vector_index
        );

        Ok(Self {
            api_url: config.atlas_api_url.clone(),
            api_key: config.atlas_api_key.clone(),
            data_source: config.atlas_data_source.clone(),
            database: config.atlas_database.clone(),
            collection: config.atlas_collection.clone(),
            vector_index: config.vector_index.clone(),
            client,
        })
    }

    /// POST one Data API action, merging the collection coordinates into
    /// the request body
    async fn call(&self, action: &str, mut body: Value) -> Result<Value> {
        let url = format!("{}/action/{}", self.api_url, action);

        let object = body
            .as_object_mut()
            .ok_or_else(|| ProdSearchError::internal("Data API body must be an object"))?;
        object.insert("dataSource".to_string(), json!(self.data_source));
        object.insert("database".to_string(), json!(self.database));
        object.insert("collection".to_string(), json!(self.collection));

        let response = self
            .client
            .post(&url)
            .header("api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| ProdSearchError::storage(format!("Data API request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(ProdSearchError::storage(format!(
                "Data API {} returned {}: {}",
                action, status, detail
            )));
        }

        response
            .json()
            .await
            .map_err(|e| ProdSearchError::storage(format!("Invalid Data API response: {}", e)))
    }
}

#[async_trait]
impl VectorStore for AtlasVectorStore {
    async fn insert_many(&self, documents: &[ChunkDocument]) -> Result<usize> {
        if documents.is_empty() {
            return Ok(0);
        }

        let body = json!({ "documents": documents });
        let response = self.call("insertMany", body).await?;

        let inserted = response
            .get("insertedIds")
            .and_then(Value::as_array)
            .map(|ids| ids.len())
            .unwrap_or(0);

        debug!("Inserted {} chunk documents", inserted);
        Ok(inserted)
    }

    async fn delete_all(&self) -> Result<u64> {
        let body = json!({ "filter": {} });
        let response = self.call("deleteMany", body).await?;

        let deleted = response
            .get("deletedCount")
            .and_then(Value::as_u64)
            .unwrap_or(0);

        info!("Cleared collection: {} documents deleted", deleted);
        Ok(deleted)
    }

    async fn nearest_neighbors(
        &self,
        query_vector: &[f32],
        num_candidates: usize,
        limit: usize,
    ) -> Result<Vec<SearchHit>> {
        let pipeline = json!([
            {
                "$vectorSearch": {
                    "index": self.vector_index,
                    "path": "description_vector",
                    "queryVector": query_vector,
                    "numCandidates": num_candidates,
                    "limit": limit,
                }
            },
            {
                "$project": {
                    "_id": 0,
                    "product_id": 1,
                    "name": 1,
                    "url": 1,
                    "brand": 1,
                    "category_name": 1,
                    "price": 1,
                    "market_price": 1,
                    "average_rating": 1,
                    "chunk_text": 1,
                    "chunk_id": 1,
                    "score": { "$meta": "vectorSearchScore" },
                }
            }
        ]);

        let response = self.call("aggregate", json!({ "pipeline": pipeline })).await?;

        let documents = response
            .get("documents")
            .cloned()
            .unwrap_or_else(|| json!([]));
        let hits: Vec<SearchHit> = serde_json::from_value(documents)
            .map_err(|e| ProdSearchError::storage(format!("Malformed search hit: {}", e)))?;

        debug!("Vector search returned {} chunk hits", hits.len());
        Ok(hits)
    }

    async fn collection_stats(&self) -> Result<CollectionStats> {
        let pipeline = json!([
            { "$group": { "_id": "$product_id", "chunks": { "$sum": 1 } } },
            {
                "$group": {
                    "_id": null,
                    "total_products": { "$sum": 1 },
                    "total_chunks": { "$sum": "$chunks" },
                    "max_chunks": { "$max": "$chunks" },
                }
            }
        ]);

        let response = self.call("aggregate", json!({ "pipeline": pipeline })).await?;

        let row = response
            .get("documents")
            .and_then(Value::as_array)
            .and_then(|docs| docs.first())
            .cloned();

        let stats = match row {
            Some(row) => {
                let total_chunks = row.get("total_chunks").and_then(Value::as_u64).unwrap_or(0);
                let total_products =
                    row.get("total_products").and_then(Value::as_u64).unwrap_or(0);
                let max_chunks = row.get("max_chunks").and_then(Value::as_u64).unwrap_or(0);
                CollectionStats {
                    total_chunks,
                    total_products,
                    average_chunks_per_product: if total_products > 0 {
                        total_chunks as f64 / total_products as f64
                    } else {
                        0.0
                    },
                    max_chunks_per_product: max_chunks,
                }
            }
            // Empty collection
            None => CollectionStats {
                total_chunks: 0,
                total_products: 0,
                average_chunks_per_product: 0.0,
                max_chunks_per_product: 0,
            },
        };

        Ok(stats)
    }
}
