use async_trait::async_trait;
use jurisai_common::{JurisError, Result};
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;
use tracing::{debug, info, warn};

use crate::distance::DistanceMetric;
use crate::store::VectorStore;
use crate::types::{CollectionData, SearchHit, VectorRecord};

/// Vector collection with exact linear-scan search
///
/// Persisted as a single JSON document when opened from a path,
/// otherwise kept in memory for the lifetime of the process.
///
/// Every `add` on a persisted collection rewrites the whole file while
/// holding the write lock, so indexing is O(N) in the record count and
/// searches wait for the disk write to finish.
pub struct Collection {
    name: String,
    data: RwLock<CollectionData>,
    path: Option<PathBuf>,
}

impl Collection {
    /// Open the collection stored at `path`, creating it if absent
    pub async fn open_or_create(
        path: impl Into<PathBuf>,
        name: &str,
        metric: DistanceMetric,
    ) -> Result<Self> {
        let path = path.into();

        let data = if path.exists() {
            let raw = tokio::fs::read_to_string(&path).await?;
            let data: CollectionData = serde_json::from_str(&raw).map_err(|e| {
                JurisError::vector_store(format!(
                    "Corrupted collection file {}: {}",
                    path.display(),
                    e
                ))
            })?;
            if data.metric != metric {
                warn!(
                    "Collection '{}' was created with metric {}, ignoring configured {}",
                    data.name, data.metric, metric
                );
            }
            info!(
                "Reopened collection '{}' - {} records",
                data.name,
                data.count()
            );
            data
        } else {
            let data = CollectionData::new(name, metric);
            save(&path, &data).await?;
            info!("Created collection '{}' at {}", name, path.display());
            data
        };

        Ok(Self {
            name: data.name.clone(),
            data: RwLock::new(data),
            path: Some(path),
        })
    }

    /// Create a collection that lives only in memory
    pub fn in_memory(name: &str, metric: DistanceMetric) -> Self {
        info!("Created in-memory collection '{}'", name);
        Self {
            name: name.to_string(),
            data: RwLock::new(CollectionData::new(name, metric)),
            path: None,
        }
    }

    /// Distance metric of this collection
    pub async fn metric(&self) -> DistanceMetric {
        self.data.read().await.metric
    }

    /// Backing file, if persisted
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

#[async_trait]
impl VectorStore for Collection {
    async fn add(&self, record: VectorRecord) -> Result<()> {
        if record.embedding.is_empty() {
            return Err(JurisError::vector_store("Cannot store an empty embedding"));
        }

        let mut data = self.data.write().await;

        if data.contains(&record.id) {
            return Err(JurisError::vector_store(format!(
                "Duplicate document id: {}",
                record.id
            )));
        }

        match data.dimension {
            Some(dim) if dim != record.embedding.len() => {
                return Err(JurisError::vector_store(format!(
                    "Embedding dimension {} does not match collection dimension {}",
                    record.embedding.len(),
                    dim
                )));
            }
            Some(_) => {}
            None => data.dimension = Some(record.embedding.len()),
        }

        let id = record.id.clone();
        let first_record = data.records.is_empty();
        data.records.push(record);

        if let Some(path) = &self.path {
            if let Err(e) = save(path, &data).await {
                // Keep memory consistent with what is on disk
                data.records.pop();
                if first_record {
                    data.dimension = None;
                }
                return Err(e);
            }
        }

        debug!("Record added to collection '{}': {}", self.name, id);
        Ok(())
    }

    async fn search(&self, query: &[f32], max_results: usize) -> Result<Vec<SearchHit>> {
        let data = self.data.read().await;

        if data.records.is_empty() || max_results == 0 {
            return Ok(Vec::new());
        }

        if let Some(dim) = data.dimension {
            if dim != query.len() {
                return Err(JurisError::vector_store(format!(
                    "Query dimension {} does not match collection dimension {}",
                    query.len(),
                    dim
                )));
            }
        }

        let metric = data.metric;
        let mut scored: Vec<(f32, &VectorRecord)> = data
            .records
            .iter()
            .map(|r| (metric.distance(query, &r.embedding), r))
            .collect();

        // Stable sort keeps insertion order among equal distances
        scored.sort_by(|a, b| a.0.total_cmp(&b.0));
        scored.truncate(max_results);

        debug!(
            "Search in '{}' - {} results from {} candidates",
            self.name,
            scored.len(),
            data.count()
        );

        Ok(scored
            .into_iter()
            .map(|(distance, r)| SearchHit {
                id: r.id.clone(),
                content: r.content.clone(),
                metadata: r.metadata.clone(),
                distance,
            })
            .collect())
    }

    async fn count(&self) -> Result<usize> {
        Ok(self.data.read().await.count())
    }

    async fn record_ids(&self) -> Result<Vec<String>> {
        Ok(self
            .data
            .read()
            .await
            .records
            .iter()
            .map(|r| r.id.clone())
            .collect())
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// Write the collection next to its destination, then rename over it
async fn save(path: &Path, data: &CollectionData) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let json = serde_json::to_string(data)?;
    let tmp_path = path.with_extension("json.tmp");
    tokio::fs::write(&tmp_path, json).await?;
    tokio::fs::rename(&tmp_path, path).await?;
    Ok(())
}
