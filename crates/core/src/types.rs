use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Product record as read from the source dataset
///
/// Field names follow the dataset's JSON keys. Immutable once read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Product identifier
    #[serde(rename = "data_product", deserialize_with = "id_from_string_or_number")]
    pub id: String,

    /// Product name
    pub name: String,

    /// Product page URL
    #[serde(default)]
    pub url: Option<String>,

    /// Brand
    #[serde(default)]
    pub brand: Option<String>,

    /// Category name
    #[serde(rename = "category_name", default)]
    pub category: Option<String>,

    /// Sale price
    #[serde(default)]
    pub price: Option<f64>,

    /// Market price
    #[serde(default)]
    pub market_price: Option<f64>,

    /// Average customer rating
    #[serde(default)]
    pub average_rating: Option<f64>,

    /// Free-text description
    #[serde(rename = "descriptioninfo", default)]
    pub description: Option<String>,
}

/// The dataset is inconsistent about id types; accept both
fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        other => Err(serde::de::Error::custom(format!(
            "product id must be a string or number, got {}",
            other
        ))),
    }
}

/// A bounded-length segment of one product's description
///
/// `text` stays within the configured chunk size except when a single
/// sentence alone exceeds it; the sentence is kept whole rather than
/// truncated mid-meaning.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// Chunk text
    pub text: String,

    /// Zero-based sequence number within the parent product
    pub chunk_index: usize,

    /// Char offset into the normalized description where this chunk's
    /// new (non-overlap) content begins. Provenance only.
    pub start_offset: usize,
}

/// Stored unit: a chunk plus copied-down product metadata and its embedding
///
/// Created once at load time, never mutated after insertion. Serde field
/// names match the collection's document keys.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChunkDocument {
    pub product_id: String,
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub market_price: Option<f64>,
    #[serde(default)]
    pub average_rating: Option<f64>,

    /// Chunk text, the field the vector index embeds
    pub chunk_text: String,

    /// Chunk sequence number within the product
    pub chunk_id: usize,

    /// Char offset of the chunk's new content in the normalized description
    #[serde(default)]
    pub chunk_start_pos: usize,

    /// True for a real description chunk, false for the metadata-only
    /// fallback document emitted when a product has no description
    pub is_chunk: bool,

    /// Short preview of the full description, for display
    #[serde(default)]
    pub full_description: Option<String>,

    /// Embedding vector for `chunk_text`
    pub description_vector: Vec<f32>,

    /// Timestamp when the document was built
    pub indexed_at: DateTime<Utc>,
}

impl ChunkDocument {
    /// Max chars of the description preview copied onto each document
    const PREVIEW_CHARS: usize = 200;

    /// Build a document from a real chunk of the product's description
    pub fn from_chunk(product: &Product, chunk: &Chunk, vector: Vec<f32>) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            url: product.url.clone(),
            brand: product.brand.clone(),
            category_name: product.category.clone(),
            price: product.price,
            market_price: product.market_price,
            average_rating: product.average_rating,
            chunk_text: chunk.text.clone(),
            chunk_id: chunk.chunk_index,
            chunk_start_pos: chunk.start_offset,
            is_chunk: true,
            full_description: product.description.as_deref().map(Self::preview),
            description_vector: vector,
            indexed_at: Utc::now(),
        }
    }

    /// Build the metadata-only fallback document keyed on the product name
    pub fn fallback(product: &Product, vector: Vec<f32>) -> Self {
        Self {
            product_id: product.id.clone(),
            name: product.name.clone(),
            url: product.url.clone(),
            brand: product.brand.clone(),
            category_name: product.category.clone(),
            price: product.price,
            market_price: product.market_price,
            average_rating: product.average_rating,
            chunk_text: product.name.clone(),
            chunk_id: 0,
            chunk_start_pos: 0,
            is_chunk: false,
            full_description: None,
            description_vector: vector,
            indexed_at: Utc::now(),
        }
    }

    fn preview(description: &str) -> String {
        let mut preview: String = description.chars().take(Self::PREVIEW_CHARS).collect();
        if description.chars().count() > Self::PREVIEW_CHARS {
            preview.push_str("...");
        }
        preview
    }
}

/// A chunk-level search hit returned by the vector store
///
/// Transient: exists only for the duration of one query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchHit {
    pub product_id: String,
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub market_price: Option<f64>,
    #[serde(default)]
    pub average_rating: Option<f64>,

    /// Text of the matched chunk
    pub chunk_text: String,

    /// Chunk sequence number within the product
    #[serde(default)]
    pub chunk_id: usize,

    /// Similarity score, higher = more similar
    pub score: f32,
}

/// One product folded together from its chunk-level hits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AggregatedProduct {
    pub product_id: String,
    pub name: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default)]
    pub market_price: Option<f64>,
    #[serde(default)]
    pub average_rating: Option<f64>,

    /// Score of the product's best-scoring chunk
    pub score: f32,

    /// Best chunk's text, shown as the product description
    #[serde(rename = "descriptioninfo")]
    pub description: String,

    /// Up to the first 3 chunk texts from the group, in arrival order
    pub relevant_chunks: Vec<String>,

    /// Number of hits for this product in the query batch
    pub total_chunks_found: usize,
}
