use actix_web::{post, web, HttpResponse};
use serde::Serialize;
use tracing::info;

use prodsearch_core::{aggregate_hits, AggregatedProduct};

use crate::state::AppState;
use crate::types::{to_http_error, SearchRequest};

/// Chunk hits fetched per requested product when the client does not say
const CHUNKS_PER_PRODUCT: usize = 4;

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub results: Vec<AggregatedProduct>,
    pub query: String,
    pub count: usize,
    pub total_chunks_searched: usize,
}

#[post("/search")]
pub async fn search(
    request: web::Json<SearchRequest>,
    state: web::Data<std::sync::Arc<AppState>>,
) -> actix_web::Result<HttpResponse> {
    if request.text.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().body("Search text cannot be empty"));
    }

    let limit = request.limit.unwrap_or(state.config.default_limit);
    if limit == 0 {
        return Ok(HttpResponse::BadRequest().body("Limit must be greater than 0"));
    }
    let chunk_limit = request
        .chunk_limit
        .unwrap_or(limit * CHUNKS_PER_PRODUCT)
        .max(limit);

    // Embed the query with the same model used at load time
    let query_vector = state
        .embedder
        .embed(&request.text)
        .await
        .map_err(to_http_error)?;

    // Retrieve chunk-level hits
    let hits = state
        .store
        .nearest_neighbors(&query_vector, state.config.num_candidates, chunk_limit)
        .await
        .map_err(to_http_error)?;
    let total_chunks_searched = hits.len();

    // Fold chunk hits back to unique products
    let results = aggregate_hits(&hits, limit).map_err(to_http_error)?;

    info!(
        "Search '{}' -> {} chunks, {} products",
        request.text,
        total_chunks_searched,
        results.len()
    );

    let count = results.len();
    Ok(HttpResponse::Ok().json(SearchResponse {
        results,
        query: request.text.clone(),
        count,
        total_chunks_searched,
    }))
}
