//! JurisAI Embedding Provider
//!
//! Text embedding behind the [`Embedder`] trait, backed by the Ollama embed API

mod client;
mod embedder;
mod types;

pub use client::OllamaEmbedder;
pub use embedder::Embedder;
pub use types::{EmbedRequest, EmbedResponse, Embedding};
