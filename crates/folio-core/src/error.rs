use thiserror::Error;

/// Everything that can go wrong inside folio-core
#[derive(Error, Debug)]
pub enum Error {
    #[error("API request failed: {0}")]
    ApiError(String),

    #[error("Could not normalize repository {id}: {reason}")]
    MappingError { id: u64, reason: String },

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Chat is unavailable: {0}")]
    ChatUnavailable(String),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}
