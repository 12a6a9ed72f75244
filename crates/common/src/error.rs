/// JurisAI error types
#[derive(Debug, thiserror::Error)]
pub enum JurisError {
    /// Embedding model related error
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Vector store related error
    #[error("Vector store error: {0}")]
    VectorStore(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Network/HTTP error (backend unreachable)
    #[error("Network error: {0}")]
    Network(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// General error (anyhow integration)
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl JurisError {
    /// Create embedding error
    pub fn embedding<S: Into<String>>(msg: S) -> Self {
        Self::Embedding(msg.into())
    }

    /// Create vector store error
    pub fn vector_store<S: Into<String>>(msg: S) -> Self {
        Self::VectorStore(msg.into())
    }

    /// Create config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create network error
    pub fn network<S: Into<String>>(msg: S) -> Self {
        Self::Network(msg.into())
    }

    /// Create invalid input error
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create not found error
    pub fn not_found<S: Into<String>>(msg: S) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create internal error
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        Self::Internal(msg.into())
    }
}

impl JurisError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            Self::InvalidInput(_) => 400,
            Self::NotFound(_) => 404,
            Self::Network(_) => 503,
            Self::Config(_) => 500,
            Self::Internal(_) => 500,
            Self::Embedding(_) => 500,
            Self::VectorStore(_) => 500,
            Self::Io(_) => 500,
            // Only raised while decoding caller-supplied JSON at this layer
            Self::Json(_) => 400,
            Self::Other(_) => 500,
        }
    }

    /// Whether the error was caused by the caller rather than a backend
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }
}
