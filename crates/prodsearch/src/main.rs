mod loader;

use anyhow::Result;
use clap::{Parser, Subcommand};
use prodsearch_common::{logger, AppConfig};
use prodsearch_embed::{OllamaEmbedder, TextEmbedder};
use prodsearch_store::{AtlasVectorStore, VectorStore};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "prodsearch")]
#[command(about = "Semantic product search over chunked descriptions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP search API server
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Port to bind to
        #[arg(long, default_value = "8001")]
        port: u16,
    },

    /// Chunk, embed and load the product dataset into the vector store
    Load {
        /// Path to the product dataset (JSON array)
        #[arg(long)]
        data_path: Option<PathBuf>,
    },
}

/// Build the collaborator handles the core depends on
fn build_collaborators(
    config: &AppConfig,
) -> Result<(Arc<dyn TextEmbedder>, Arc<dyn VectorStore>)> {
    let embedder = OllamaEmbedder::new(
        config.ollama_base_url.clone(),
        config.embedding_model.clone(),
    )?;
    let store = AtlasVectorStore::new(config)?;
    Ok((Arc::new(embedder), Arc::new(store)))
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Serve { host, port }) => {
            // Override with CLI arguments before config load
            std::env::set_var("SERVER_HOST", &host);
            std::env::set_var("SERVER_PORT", port.to_string());

            let config = AppConfig::from_env()?;
            logger::setup_logging(&config.log_dir, &config.log_level)?;

            tracing::info!("ProdSearch starting...");
            tracing::info!("  Bind: {}", config.server_bind_address());
            tracing::info!("  Embedding model: {}", config.embedding_model);
            tracing::info!(
                "  Chunking: size={}, overlap={}",
                config.chunk_size,
                config.chunk_overlap
            );

            let (embedder, store) = build_collaborators(&config)?;
            prodsearch_server::start_server(config, embedder, store).await?;
        }
        Some(Commands::Load { data_path }) => {
            if let Some(path) = &data_path {
                std::env::set_var("DATA_PATH", path);
            }

            let config = AppConfig::from_env()?;
            logger::setup_console_logging(&config.log_level)?;

            let (embedder, store) = build_collaborators(&config)?;
            let summary = loader::load_products(&config, embedder, store).await?;

            println!(
                "Loaded {} products as {} chunk documents ({} skipped)",
                summary.products, summary.documents, summary.skipped
            );
        }
        None => {
            // Default: start server with environment configuration
            let config = AppConfig::from_env()?;
            logger::setup_logging(&config.log_dir, &config.log_level)?;

            tracing::info!("ProdSearch starting with default configuration...");

            let (embedder, store) = build_collaborators(&config)?;
            prodsearch_server::start_server(config, embedder, store).await?;
        }
    }

    Ok(())
}
