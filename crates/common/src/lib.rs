pub mod config;
pub mod error;
pub mod logger;

// Re-export commonly used types
pub use config::{AppConfig, IdStrategy, DISTANCE_METRICS};
pub use error::JurisError;
pub type Result<T> = std::result::Result<T, JurisError>;
