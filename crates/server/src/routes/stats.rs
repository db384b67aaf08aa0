use actix_web::{get, web, HttpResponse};

use crate::state::AppState;
use crate::types::to_http_error;

#[get("/stats")]
pub async fn stats(
    state: web::Data<std::sync::Arc<AppState>>,
) -> actix_web::Result<HttpResponse> {
    let stats = state
        .store
        .collection_stats()
        .await
        .map_err(to_http_error)?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "total_chunks": stats.total_chunks,
        "total_products": stats.total_products,
        "average_chunks_per_product": stats.average_chunks_per_product,
        "max_chunks_per_product": stats.max_chunks_per_product,
        "embedding_model": state.config.embedding_model,
        "chunk_size": state.config.chunk_size,
        "chunk_overlap": state.config.chunk_overlap,
    })))
}
