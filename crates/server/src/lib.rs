//! ProdSearch HTTP server
//!
//! Actix-web JSON API over the search pipeline: query embedding, vector
//! search and product-level aggregation

pub mod routes;
pub mod state;
pub mod types;

use actix_cors::Cors;
use actix_web::{web, App, HttpServer};
use prodsearch_common::{AppConfig, Result};
use prodsearch_embed::TextEmbedder;
use prodsearch_store::VectorStore;
use std::sync::Arc;
use tracing::info;
use tracing_actix_web::TracingLogger;

use crate::state::AppState;

/// Start the HTTP server with injected collaborator handles
pub async fn start_server(
    config: AppConfig,
    embedder: Arc<dyn TextEmbedder>,
    store: Arc<dyn VectorStore>,
) -> Result<()> {
    let bind_address = config.server_bind_address();
    let state = Arc::new(AppState::new(config, embedder, store));

    info!("Starting HTTP server on {}", bind_address);

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .wrap(Cors::permissive())
            .app_data(web::Data::new(state.clone()))
            .service(routes::search::search)
            .service(routes::stats::stats)
            .service(routes::health::health)
    })
    .bind(&bind_address)?
    .run()
    .await?;

    Ok(())
}
