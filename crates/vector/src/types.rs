use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::distance::DistanceMetric;

/// Free-form document metadata
pub type Metadata = serde_json::Map<String, serde_json::Value>;

/// Stored record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorRecord {
    /// Document ID
    pub id: String,

    /// Embedding vector
    pub embedding: Vec<f32>,

    /// Document text
    pub content: String,

    /// Document metadata
    #[serde(default)]
    pub metadata: Metadata,

    /// Timestamp when indexed
    pub indexed_at: DateTime<Utc>,
}

impl VectorRecord {
    pub fn new(
        id: impl Into<String>,
        embedding: Vec<f32>,
        content: impl Into<String>,
        metadata: Metadata,
    ) -> Self {
        Self {
            id: id.into(),
            embedding,
            content: content.into(),
            metadata,
            indexed_at: Utc::now(),
        }
    }
}

/// On-disk collection layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionData {
    /// Collection name
    pub name: String,

    /// Distance metric fixed at creation
    pub metric: DistanceMetric,

    /// Embedding dimension, set by the first record
    pub dimension: Option<usize>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Records in insertion order
    #[serde(default)]
    pub records: Vec<VectorRecord>,
}

impl CollectionData {
    /// Create new empty collection
    pub fn new(name: impl Into<String>, metric: DistanceMetric) -> Self {
        Self {
            name: name.into(),
            metric,
            dimension: None,
            created_at: Utc::now(),
            records: Vec::new(),
        }
    }

    /// Whether a record with this id exists
    pub fn contains(&self, id: &str) -> bool {
        self.records.iter().any(|r| r.id == id)
    }

    /// Count records
    pub fn count(&self) -> usize {
        self.records.len()
    }
}

/// Search hit
#[derive(Debug, Clone)]
pub struct SearchHit {
    /// Document ID
    pub id: String,

    /// Document text
    pub content: String,

    /// Metadata
    pub metadata: Metadata,

    /// Distance from the query (lower is more similar)
    pub distance: f32,
}
