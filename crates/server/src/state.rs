use jurisai_common::{AppConfig, Result};
use jurisai_embed::{Embedder, OllamaEmbedder};
use jurisai_vector::{Collection, DistanceMetric, VectorStore};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

use crate::service::SearchService;

/// Shared application state
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,

    /// Index/search orchestration
    pub service: SearchService,
}

impl AppState {
    /// Build the embedder and the collection from configuration
    pub async fn new(config: AppConfig) -> Result<Self> {
        let embedder = OllamaEmbedder::new(
            &config.ollama_base_url,
            &config.embedding_model,
            Duration::from_secs(config.embedding_timeout_secs),
        )?;

        match embedder.probe().await {
            Ok(true) => info!("Embedding backend reachable at {}", config.ollama_base_url),
            Ok(false) => warn!("Embedding backend at {} answered with an error", config.ollama_base_url),
            Err(e) => warn!("Embedding backend not reachable yet: {}", e),
        }

        let metric: DistanceMetric = config.distance_metric.parse()?;
        let store: Arc<dyn VectorStore> = if config.persist_collection {
            Arc::new(
                Collection::open_or_create(config.collection_path(), &config.collection_name, metric)
                    .await?,
            )
        } else {
            Arc::new(Collection::in_memory(&config.collection_name, metric))
        };

        let service = SearchService::new(Arc::new(embedder), store, config.id_strategy).await?;

        Ok(Self::with_service(config, service))
    }

    /// Assemble state around an existing service
    pub fn with_service(config: AppConfig, service: SearchService) -> Self {
        Self { config, service }
    }
}
