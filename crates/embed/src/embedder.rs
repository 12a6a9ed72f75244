use async_trait::async_trait;
use jurisai_common::Result;

use crate::types::Embedding;

/// Common trait for embedding providers
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Encode texts into vectors, one per input in input order
    async fn encode(&self, texts: &[String]) -> Result<Vec<Embedding>>;

    /// Model identifier reported by the service
    fn model_name(&self) -> &str;

    /// Check that the backing model is reachable
    async fn probe(&self) -> Result<bool>;
}
