use jurisai_vector::{Metadata, SearchHit};
use serde::{Deserialize, Serialize};

/// Search request body
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    /// Search query text
    pub query: String,

    /// Maximum number of results
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Reserved; accepted but not applied
    #[serde(default)]
    pub filters: Option<Metadata>,
}

fn default_max_results() -> usize {
    10
}

/// Index request query parameters
#[derive(Debug, Deserialize)]
pub struct IndexQuery {
    /// Document text
    pub content: String,

    /// JSON-encoded metadata object
    #[serde(default = "default_metadata")]
    pub metadata: String,
}

fn default_metadata() -> String {
    "{}".to_string()
}

/// Search result document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Document {
    /// Document ID
    pub id: String,

    /// Document text
    pub content: String,

    /// Document metadata
    pub metadata: Metadata,

    /// Distance from the query (lower is more similar)
    pub score: f32,
}

impl From<SearchHit> for Document {
    fn from(hit: SearchHit) -> Self {
        Self {
            id: hit.id,
            content: hit.content,
            metadata: hit.metadata,
            score: hit.distance,
        }
    }
}

/// Index response
#[derive(Debug, Serialize, Deserialize)]
pub struct IndexResponse {
    pub status: String,
    pub id: String,
}

/// Stats response
#[derive(Debug, Serialize, Deserialize)]
pub struct StatsResponse {
    pub total_documents: usize,
    pub model: String,
    pub status: String,
}

/// Health response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub ml_models: String,
    pub db: String,
}

/// Service banner
#[derive(Debug, Serialize, Deserialize)]
pub struct RootResponse {
    pub message: String,
    pub status: String,
}
