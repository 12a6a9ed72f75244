use jurisai_common::{IdStrategy, JurisError, Result};
use jurisai_embed::{Embedder, Embedding};
use jurisai_vector::{Metadata, VectorRecord, VectorStore};
use std::sync::Arc;
use tracing::{debug, info};

use crate::ids::{last_sequence_number, IdGenerator};
use crate::types::Document;

/// Index and search orchestration over an embedder and a vector store
pub struct SearchService {
    embedder: Arc<dyn Embedder>,
    store: Arc<dyn VectorStore>,
    ids: IdGenerator,
}

impl SearchService {
    /// Create the service; sequential ids continue after the highest stored one
    pub async fn new(
        embedder: Arc<dyn Embedder>,
        store: Arc<dyn VectorStore>,
        id_strategy: IdStrategy,
    ) -> Result<Self> {
        let stored = store.record_ids().await?;
        let last_issued = last_sequence_number(&stored);

        info!(
            "Search service ready - collection '{}', {} documents, last id doc_{}, id strategy {:?}",
            store.name(),
            stored.len(),
            last_issued,
            id_strategy
        );

        Ok(Self {
            embedder,
            store,
            ids: IdGenerator::new(id_strategy, last_issued),
        })
    }

    /// Embed and store one document, returning its new id
    pub async fn index(&self, content: &str, metadata_json: &str) -> Result<String> {
        if content.trim().is_empty() {
            return Err(JurisError::invalid_input("content cannot be empty"));
        }
        let metadata = parse_metadata(metadata_json)?;

        let embedding = self.embed_one(content).await?;
        let id = self.ids.next_id();

        self.store
            .add(VectorRecord::new(&id, embedding, content, metadata))
            .await?;

        info!("Document indexed: {} ({} chars)", id, content.len());
        Ok(id)
    }

    /// Nearest documents to `query`, best match first
    pub async fn search(
        &self,
        query: &str,
        max_results: usize,
        filters: Option<&Metadata>,
    ) -> Result<Vec<Document>> {
        if query.trim().is_empty() {
            return Err(JurisError::invalid_input("query cannot be empty"));
        }
        if max_results == 0 {
            return Err(JurisError::invalid_input("max_results must be at least 1"));
        }
        if let Some(filters) = filters {
            debug!("Ignoring {} search filter(s); filtering is not applied", filters.len());
        }

        let embedding = self.embed_one(query).await?;
        let hits = self.store.search(&embedding, max_results).await?;

        debug!("Search completed - {} results for '{}'", hits.len(), query);
        Ok(hits.into_iter().map(Document::from).collect())
    }

    /// Document count and model name
    pub async fn stats(&self) -> Result<(usize, String)> {
        let count = self.store.count().await?;
        Ok((count, self.embedder.model_name().to_string()))
    }

    async fn embed_one(&self, text: &str) -> Result<Embedding> {
        self.embedder
            .encode(&[text.to_string()])
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| JurisError::embedding("Embedding provider returned no vector"))
    }
}

/// Metadata must be a JSON object
fn parse_metadata(raw: &str) -> Result<Metadata> {
    let value: serde_json::Value = serde_json::from_str(raw)
        .map_err(|e| JurisError::invalid_input(format!("Malformed metadata JSON: {}", e)))?;

    match value {
        serde_json::Value::Object(map) => Ok(map),
        other => Err(JurisError::invalid_input(format!(
            "metadata must be a JSON object, got {}",
            other
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use jurisai_vector::{Collection, DistanceMetric};

    /// One dimension per character class keeps vectors predictable
    struct CharClassEmbedder;

    #[async_trait]
    impl Embedder for CharClassEmbedder {
        async fn encode(&self, texts: &[String]) -> Result<Vec<Embedding>> {
            Ok(texts
                .iter()
                .map(|t| {
                    vec![
                        t.chars().filter(|c| c.is_alphabetic()).count() as f32,
                        t.chars().filter(|c| c.is_numeric()).count() as f32,
                        t.chars().filter(|c| c.is_whitespace()).count() as f32,
                    ]
                })
                .collect())
        }

        fn model_name(&self) -> &str {
            "char-class"
        }

        async fn probe(&self) -> Result<bool> {
            Ok(true)
        }
    }

    async fn service() -> SearchService {
        let store = Arc::new(Collection::in_memory("legal_docs", DistanceMetric::L2));
        SearchService::new(Arc::new(CharClassEmbedder), store, IdStrategy::Sequential)
            .await
            .unwrap()
    }

    #[test]
    fn test_parse_metadata() {
        let metadata = parse_metadata(r#"{"title": "Doc1", "year": 2024}"#).unwrap();
        assert_eq!(metadata["title"], "Doc1");
        assert_eq!(metadata["year"], 2024);

        assert!(parse_metadata("{}").unwrap().is_empty());
        assert!(matches!(parse_metadata("{oops"), Err(JurisError::InvalidInput(_))));
        assert!(matches!(parse_metadata("[1, 2]"), Err(JurisError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_sequential_indexing_assigns_increasing_ids() {
        let service = service().await;

        assert_eq!(service.index("contract law basics", "{}").await.unwrap(), "doc_1");
        assert_eq!(service.index("tort law 101", "{}").await.unwrap(), "doc_2");

        let (count, model) = service.stats().await.unwrap();
        assert_eq!(count, 2);
        assert_eq!(model, "char-class");
    }

    #[tokio::test]
    async fn test_ids_continue_from_existing_records() {
        let store = Arc::new(Collection::in_memory("legal_docs", DistanceMetric::L2));
        store
            .add(VectorRecord::new("doc_1", vec![1.0, 0.0, 0.0], "a", Metadata::new()))
            .await
            .unwrap();

        let service = SearchService::new(Arc::new(CharClassEmbedder), store, IdStrategy::Sequential)
            .await
            .unwrap();
        assert_eq!(service.index("second document", "{}").await.unwrap(), "doc_2");
    }

    /// Returns a shorter vector for "bad", as a swapped model would
    struct DimensionSwitchEmbedder;

    #[async_trait]
    impl Embedder for DimensionSwitchEmbedder {
        async fn encode(&self, texts: &[String]) -> Result<Vec<Embedding>> {
            Ok(texts
                .iter()
                .map(|t| {
                    if t == "bad" {
                        vec![1.0, 1.0]
                    } else {
                        vec![t.len() as f32, 1.0, 0.0]
                    }
                })
                .collect())
        }

        fn model_name(&self) -> &str {
            "dimension-switch"
        }

        async fn probe(&self) -> Result<bool> {
            Ok(true)
        }
    }

    #[tokio::test]
    async fn test_ids_after_failed_write_survive_restart() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("legal_docs.json");

        {
            let store = Arc::new(
                Collection::open_or_create(&path, "legal_docs", DistanceMetric::L2)
                    .await
                    .unwrap(),
            );
            let service =
                SearchService::new(Arc::new(DimensionSwitchEmbedder), store, IdStrategy::Sequential)
                    .await
                    .unwrap();

            assert_eq!(service.index("first", "{}").await.unwrap(), "doc_1");
            assert!(matches!(
                service.index("bad", "{}").await,
                Err(JurisError::VectorStore(_))
            ));
            assert_eq!(service.index("third", "{}").await.unwrap(), "doc_3");
        }

        let store = Arc::new(
            Collection::open_or_create(&path, "legal_docs", DistanceMetric::L2)
                .await
                .unwrap(),
        );
        let service =
            SearchService::new(Arc::new(DimensionSwitchEmbedder), store, IdStrategy::Sequential)
                .await
                .unwrap();

        assert_eq!(service.index("after restart", "{}").await.unwrap(), "doc_4");
        assert_eq!(service.stats().await.unwrap().0, 3);
    }

    #[tokio::test]
    async fn test_search_exact_content_is_best_match() {
        let service = service().await;
        service.index("short", "{}").await.unwrap();
        let id = service.index("a much longer legal text 42", "{}").await.unwrap();
        service.index("medium text here", "{}").await.unwrap();

        let docs = service.search("a much longer legal text 42", 3, None).await.unwrap();
        assert_eq!(docs[0].id, id);
        assert_eq!(docs[0].score, 0.0);
        assert!(docs.windows(2).all(|w| w[0].score <= w[1].score));
    }

    #[tokio::test]
    async fn test_search_empty_collection_returns_empty_list() {
        let service = service().await;
        assert!(service.search("anything", 10, None).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_filters_are_accepted_but_inert() {
        let service = service().await;
        service.index("contract law", r#"{"title": "A"}"#).await.unwrap();
        service.index("criminal law", r#"{"title": "B"}"#).await.unwrap();

        let mut filters = Metadata::new();
        filters.insert("title".to_string(), serde_json::json!("A"));

        let docs = service.search("law", 10, Some(&filters)).await.unwrap();
        assert_eq!(docs.len(), 2);
    }

    #[tokio::test]
    async fn test_invalid_input_is_rejected() {
        let service = service().await;

        assert!(matches!(service.index("  ", "{}").await, Err(JurisError::InvalidInput(_))));
        assert!(matches!(service.index("text", "not json").await, Err(JurisError::InvalidInput(_))));
        assert!(matches!(service.search("", 5, None).await, Err(JurisError::InvalidInput(_))));
        assert!(matches!(service.search("law", 0, None).await, Err(JurisError::InvalidInput(_))));

        // Rejected requests store nothing
        assert_eq!(service.stats().await.unwrap().0, 0);
    }
}
