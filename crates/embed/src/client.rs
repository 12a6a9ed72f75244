use async_trait::async_trait;
use jurisai_common::{JurisError, Result};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info};

use crate::embedder::Embedder;
use crate::types::{EmbedRequest, EmbedResponse, Embedding};

/// Ollama embedding client
#[derive(Debug, Clone)]
pub struct OllamaEmbedder {
    base_url: String,
    model: String,
    client: Client,
}

impl OllamaEmbedder {
    /// Create new Ollama embedder
    pub fn new(
        base_url: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let model = model.into();
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| anyhow::anyhow!("Failed to create HTTP client: {}", e))?;

        info!("Ollama embedder initialized: {} (model={})", base_url, model);
        Ok(Self {
            base_url,
            model,
            client,
        })
    }

    /// Single attempt to embed a batch; nothing is retried
    async fn try_embed(&self, url: &str, request: &EmbedRequest) -> Result<Vec<Embedding>> {
        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(JurisError::embedding(format!(
                "Ollama embed API returned {}: {}",
                status,
                body.trim()
            )));
        }

        let result: EmbedResponse = response
            .json()
            .await
            .map_err(|e| JurisError::embedding(format!("Failed to parse embedding response: {}", e)))?;

        if result.embeddings.len() != request.input.len() {
            return Err(JurisError::embedding(format!(
                "Expected {} embeddings, received {}",
                request.input.len(),
                result.embeddings.len()
            )));
        }

        if result.embeddings.iter().any(|e| e.is_empty()) {
            return Err(JurisError::embedding("Empty embedding from Ollama"));
        }

        Ok(result.embeddings)
    }
}

#[async_trait]
impl Embedder for OllamaEmbedder {
    async fn encode(&self, texts: &[String]) -> Result<Vec<Embedding>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/api/embed", self.base_url);
        debug!(
            "Generating embeddings - Model: {}, Inputs: {}",
            self.model,
            texts.len()
        );

        let request = EmbedRequest {
            model: self.model.clone(),
            input: texts.to_vec(),
        };

        let embeddings = self.try_embed(&url, &request).await?;
        debug!(
            "Received embeddings - Dimension: {}",
            embeddings.first().map(|e| e.len()).unwrap_or(0)
        );
        Ok(embeddings)
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    async fn probe(&self) -> Result<bool> {
        let url = format!("{}/api/tags", self.base_url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(classify_transport_error)?;
        Ok(response.status().is_success())
    }
}

/// Connection failures and timeouts mean the backend is unavailable
fn classify_transport_error(e: reqwest::Error) -> JurisError {
    if e.is_connect() || e.is_timeout() {
        JurisError::network(format!("Ollama is unreachable: {}", e))
    } else {
        JurisError::embedding(format!("Failed to send embedding request: {}", e))
    }
}
