use serde::{Deserialize, Serialize};

/// A single embedding vector
pub type Embedding = Vec<f32>;

/// Ollama embed request (`POST /api/embed`)
#[derive(Debug, Clone, Serialize)]
pub struct EmbedRequest {
    /// Model name (e.g., "all-minilm:l6-v2")
    pub model: String,

    /// Texts to embed
    pub input: Vec<String>,
}

/// Ollama embed response
#[derive(Debug, Clone, Deserialize)]
pub struct EmbedResponse {
    /// Model name
    #[serde(default)]
    pub model: String,

    /// One embedding per input
    pub embeddings: Vec<Embedding>,
}
