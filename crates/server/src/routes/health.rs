use actix_web::{get, web, HttpResponse};

use crate::state::AppState;

#[get("/health")]
pub async fn health(
    state: web::Data<std::sync::Arc<AppState>>,
) -> actix_web::Result<HttpResponse> {
    let embedder_up = state.embedder.test_connection().await.unwrap_or(false);

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "status": "ok",
        "embedder_available": embedder_up,
    })))
}
