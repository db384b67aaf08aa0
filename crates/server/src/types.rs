use actix_web::http::StatusCode;
use prodsearch_common::ProdSearchError;
use serde::Deserialize;

/// Search request body
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    /// Query text
    pub text: String,

    /// Maximum products to return (defaults to the configured limit)
    pub limit: Option<usize>,

    /// Chunk-level hits to retrieve before aggregation
    /// (defaults to `limit * 4` so aggregation has material to fold)
    pub chunk_limit: Option<usize>,
}

/// Convert a domain error into an actix error with the matching status
pub fn to_http_error(err: ProdSearchError) -> actix_web::Error {
    let status = StatusCode::from_u16(err.status_code())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    actix_web::error::InternalError::new(err.to_string(), status).into()
}
