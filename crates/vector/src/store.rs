use async_trait::async_trait;
use jurisai_common::Result;

use crate::types::{SearchHit, VectorRecord};

/// Storage contract used by the search service
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Store one record; rejects duplicate ids and dimension mismatches
    async fn add(&self, record: VectorRecord) -> Result<()>;

    /// Up to `max_results` records nearest to `query`, by ascending distance
    async fn search(&self, query: &[f32], max_results: usize) -> Result<Vec<SearchHit>>;

    /// Total records currently stored
    async fn count(&self) -> Result<usize>;

    /// Ids of all stored records, in insertion order
    async fn record_ids(&self) -> Result<Vec<String>>;

    /// Collection name
    fn name(&self) -> &str;
}
