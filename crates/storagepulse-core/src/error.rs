//! Error types for StoragePulse

use thiserror::Error;

/// Result type alias using StoragePulse's Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for StoragePulse operations
#[derive(Error, Debug)]
pub enum Error {
    /// An operation referenced an entity that is not in the registry
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of entity, e.g. "Provider"
        entity: String,
        /// Identifier that was looked up
        id: String,
    },

    /// Arguments were rejected before any computation took place
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Create a not found error
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a config error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}

impl From<config::ConfigError> for Error {
    fn from(err: config::ConfigError) -> Self {
        Self::Config(err.to_string())
    }
}
