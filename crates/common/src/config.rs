use crate::error::ProdSearchError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// ProdSearch application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// MongoDB Atlas Data API base URL
    pub atlas_api_url: String,

    /// Atlas Data API key
    pub atlas_api_key: String,

    /// Atlas data source (cluster) name
    pub atlas_data_source: String,

    /// Database name
    pub atlas_database: String,

    /// Collection holding chunk documents
    pub atlas_collection: String,

    /// Atlas vector search index name
    pub vector_index: String,

    /// Ollama API base URL
    pub ollama_base_url: String,

    /// Embedding model name
    pub embedding_model: String,

    /// Product dataset path (JSON array)
    pub data_path: PathBuf,

    /// Maximum characters per chunk
    pub chunk_size: usize,

    /// Characters of trailing context carried into the next chunk
    pub chunk_overlap: usize,

    /// Default number of products returned per search
    pub default_limit: usize,

    /// Approximate nearest neighbor candidate pool size
    pub num_candidates: usize,

    /// Server bind address
    pub server_host: String,

    /// Server port
    pub server_port: u16,

    /// Log directory
    pub log_dir: PathBuf,

    /// Log level
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            atlas_api_url: "https://data.mongodb-api.com/app/data-api/endpoint/data/v1"
                .to_string(),
            atlas_api_key: String::new(),
            atlas_data_source: "Cluster0".to_string(),
            atlas_database: "products".to_string(),
            atlas_collection: "product_chunks".to_string(),
            vector_index: "vector_search".to_string(),
            ollama_base_url: "http://localhost:11434".to_string(),
            embedding_model: "nomic-embed-text".to_string(),
            data_path: PathBuf::from("data/products_data.json"),
            chunk_size: 300,
            chunk_overlap: 50,
            default_limit: 5,
            num_candidates: 100,
            server_host: "0.0.0.0".to_string(),
            server_port: 8001,
            log_dir: PathBuf::from("./log"),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and .env file
    pub fn from_env() -> Result<Self, ProdSearchError> {
        // Load .env file (ignore if not exists)
        let _ = dotenv::dotenv();

        let defaults = Self::default();

        let config = Self {
            atlas_api_url: std::env::var("ATLAS_API_URL")
                .unwrap_or(defaults.atlas_api_url),
            atlas_api_key: std::env::var("ATLAS_API_KEY").unwrap_or_default(),
            atlas_data_source: std::env::var("ATLAS_DATA_SOURCE")
                .unwrap_or(defaults.atlas_data_source),
            atlas_database: std::env::var("ATLAS_DATABASE")
                .unwrap_or(defaults.atlas_database),
            atlas_collection: std::env::var("ATLAS_COLLECTION")
                .unwrap_or(defaults.atlas_collection),
            vector_index: std::env::var("VECTOR_INDEX")
                .unwrap_or(defaults.vector_index),
            ollama_base_url: std::env::var("OLLAMA_BASE_URL")
                .unwrap_or(defaults.ollama_base_url),
            embedding_model: std::env::var("EMBEDDING_MODEL")
                .unwrap_or(defaults.embedding_model),
            data_path: Self::get_env_path("DATA_PATH").unwrap_or(defaults.data_path),
            chunk_size: Self::get_env_usize("CHUNK_SIZE").unwrap_or(defaults.chunk_size),
            chunk_overlap: Self::get_env_usize("CHUNK_OVERLAP")
                .unwrap_or(defaults.chunk_overlap),
            default_limit: Self::get_env_usize("DEFAULT_LIMIT")
                .unwrap_or(defaults.default_limit),
            num_candidates: Self::get_env_usize("NUM_CANDIDATES")
                .unwrap_or(defaults.num_candidates),
            server_host: std::env::var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: std::env::var("SERVER_PORT")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.server_port),
            log_dir: Self::get_env_path("LOG_DIR").unwrap_or(defaults.log_dir),
            log_level: std::env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
        };

        config.validate()?;

        Ok(config)
    }

    /// Get PathBuf from environment variable
    fn get_env_path(key: &str) -> Option<PathBuf> {
        std::env::var(key).ok().map(PathBuf::from)
    }

    /// Get usize from environment variable
    fn get_env_usize(key: &str) -> Option<usize> {
        std::env::var(key).ok().and_then(|s| s.parse().ok())
    }

    /// Get server bind address (host:port)
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Validate configuration, fails fast before any processing begins
    pub fn validate(&self) -> Result<(), ProdSearchError> {
        if self.chunk_size == 0 {
            return Err(ProdSearchError::config("Chunk size must be greater than 0"));
        }

        if self.chunk_overlap >= self.chunk_size {
            return Err(ProdSearchError::config(format!(
                "Chunk overlap ({}) must be smaller than chunk size ({})",
                self.chunk_overlap, self.chunk_size
            )));
        }

        if self.default_limit == 0 {
            return Err(ProdSearchError::config("Default limit must be greater than 0"));
        }

        if self.num_candidates == 0 {
            return Err(ProdSearchError::config(
                "Candidate pool size must be greater than 0",
            ));
        }

        if !self.ollama_base_url.starts_with("http://")
            && !self.ollama_base_url.starts_with("https://")
        {
            return Err(ProdSearchError::config(
                "Ollama base URL must start with http:// or https://",
            ));
        }

        if !self.atlas_api_url.starts_with("http://")
            && !self.atlas_api_url.starts_with("https://")
        {
            return Err(ProdSearchError::config(
                "Atlas API URL must start with http:// or https://",
            ));
        }

        if self.server_port == 0 {
            return Err(ProdSearchError::config("Server port cannot be 0"));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.server_port, 8001);
        assert_eq!(config.chunk_size, 300);
        assert_eq!(config.chunk_overlap, 50);
    }

    #[test]
    fn test_server_bind_address() {
        let config = AppConfig::default();
        assert_eq!(config.server_bind_address(), "0.0.0.0:8001");
    }

    #[test]
    fn test_validate() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_overlap_ge_chunk_size() {
        let mut config = AppConfig::default();
        config.chunk_overlap = config.chunk_size;
        assert!(config.validate().is_err());

        config.chunk_overlap = config.chunk_size + 1;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_chunk_size() {
        let mut config = AppConfig::default();
        config.chunk_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_limit() {
        let mut config = AppConfig::default();
        config.default_limit = 0;
        assert!(config.validate().is_err());
    }
}
