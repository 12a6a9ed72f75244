use crate::error::JurisError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How new document identifiers are generated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdStrategy {
    /// `doc_1`, `doc_2`, ... from an atomic counter seeded with the store count
    Sequential,
    /// `doc_<uuid v4>`
    Uuid,
}

impl std::str::FromStr for IdStrategy {
    type Err = JurisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "sequential" => Ok(Self::Sequential),
            "uuid" => Ok(Self::Uuid),
            other => Err(JurisError::config(format!(
                "Unknown document id strategy '{}' (expected sequential or uuid)",
                other
            ))),
        }
    }
}

/// Distance metric names accepted by the vector store
pub const DISTANCE_METRICS: [&str; 3] = ["l2", "cosine", "ip"];

/// JurisAI application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Database base path
    pub db_base_path: PathBuf,

    /// Collection name
    pub collection_name: String,

    /// Persist the collection to disk (false keeps it in memory only)
    pub persist_collection: bool,

    /// Distance metric used when the collection is created
    pub distance_metric: String,

    /// Ollama API base URL
    pub ollama_base_url: String,

    /// Embedding model name
    pub embedding_model: String,

    /// Embedding request timeout in seconds
    pub embedding_timeout_secs: u64,

    /// Server bind address
    pub server_host: String,

    /// Server port
    pub server_port: u16,

    /// Prometheus exporter port (0 disables it)
    pub metrics_port: u16,

    /// Allowed CORS origins ("*" allows any)
    pub cors_allowed_origins: Vec<String>,

    /// Document id generation strategy
    pub id_strategy: IdStrategy,

    /// Log directory
    pub log_dir: PathBuf,

    /// Log level
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_base_path: PathBuf::from("./db"),
            collection_name: "legal_docs".to_string(),
            persist_collection: true,
            distance_metric: "l2".to_string(),
            ollama_base_url: "http://localhost:11434".to_string(),
            embedding_model: "all-minilm:l6-v2".to_string(),
            embedding_timeout_secs: 60,
            server_host: "0.0.0.0".to_string(),
            server_port: 8000,
            metrics_port: 9000,
            cors_allowed_origins: vec!["*".to_string()],
            id_strategy: IdStrategy::Sequential,
            log_dir: PathBuf::from("./logs"),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and .env file
    ///
    /// Creates nothing on disk; call [`AppConfig::ensure_directories`] once
    /// every override has been applied.
    pub fn from_env() -> Result<Self, JurisError> {
        // Load .env file (ignore if not exists)
        let _ = dotenv::dotenv();

        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup, falling back to defaults
    pub fn from_source<F>(get: F) -> Result<Self, JurisError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        let id_strategy = match get("DOC_ID_STRATEGY") {
            Some(value) => value.parse()?,
            None => defaults.id_strategy,
        };

        Ok(Self {
            db_base_path: get("DB_BASE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.db_base_path),
            collection_name: get("COLLECTION_NAME").unwrap_or(defaults.collection_name),
            persist_collection: get("PERSIST_COLLECTION")
                .and_then(|s| parse_bool(&s))
                .unwrap_or(defaults.persist_collection),
            distance_metric: get("DISTANCE_METRIC")
                .map(|s| s.trim().to_lowercase())
                .unwrap_or(defaults.distance_metric),
            ollama_base_url: get("OLLAMA_BASE_URL").unwrap_or(defaults.ollama_base_url),
            embedding_model: get("EMBEDDING_MODEL").unwrap_or(defaults.embedding_model),
            embedding_timeout_secs: get("EMBEDDING_TIMEOUT_SECS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.embedding_timeout_secs),
            server_host: get("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: get("SERVER_PORT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.server_port),
            metrics_port: get("METRICS_PORT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.metrics_port),
            cors_allowed_origins: get("CORS_ALLOWED_ORIGINS")
                .map(|s| {
                    s.split(',')
                        .map(|o| o.trim().to_string())
                        .filter(|o| !o.is_empty())
                        .collect()
                })
                .unwrap_or(defaults.cors_allowed_origins),
            id_strategy,
            log_dir: get("LOG_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.log_dir),
            log_level: get("LOG_LEVEL").unwrap_or(defaults.log_level),
        })
    }

    /// Ensure required directories exist, create if not
    pub fn ensure_directories(&self) -> Result<(), JurisError> {
        let mut dirs = vec![&self.log_dir];
        if self.persist_collection {
            dirs.push(&self.db_base_path);
        }

        for dir in dirs {
            if !dir.exists() {
                std::fs::create_dir_all(dir).map_err(|e| {
                    JurisError::config(format!(
                        "Failed to create directory {}: {}",
                        dir.display(),
                        e
                    ))
                })?;
            }
        }

        Ok(())
    }

    /// Get collection file path
    pub fn collection_path(&self) -> PathBuf {
        self.db_base_path.join(format!("{}.json", self.collection_name))
    }

    /// Get server bind address (host:port)
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Whether CORS should accept any origin
    pub fn cors_allows_any(&self) -> bool {
        self.cors_allowed_origins.is_empty() || self.cors_allowed_origins.iter().any(|o| o == "*")
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), JurisError> {
        if self.embedding_model.is_empty() {
            return Err(JurisError::config("Embedding model name cannot be empty"));
        }

        if self.collection_name.is_empty()
            || !self
                .collection_name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(JurisError::config(format!(
                "Invalid collection name '{}': use letters, digits, '_' or '-'",
                self.collection_name
            )));
        }

        if !DISTANCE_METRICS.contains(&self.distance_metric.as_str()) {
            return Err(JurisError::config(format!(
                "Unknown distance metric '{}' (expected one of {:?})",
                self.distance_metric, DISTANCE_METRICS
            )));
        }

        // Validate Ollama URL
        if !self.ollama_base_url.starts_with("http://")
            && !self.ollama_base_url.starts_with("https://") {
            return Err(JurisError::config(
                "Ollama base URL must start with http:// or https://"
            ));
        }

        if self.embedding_timeout_secs == 0 {
            return Err(JurisError::config("Embedding timeout cannot be 0"));
        }

        // Validate port range
        if self.server_port == 0 {
            return Err(JurisError::config("Server port cannot be 0"));
        }

        if self.metrics_port == self.server_port {
            return Err(JurisError::config(
                "Metrics port must differ from the server port"
            ));
        }

        Ok(())
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
