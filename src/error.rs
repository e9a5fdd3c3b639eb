//! Connector error types

use crate::telegram::TelegramApiError;
use crate::transport::TransportError;
use thiserror::Error;

/// Connector error type
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Caller supplied parameters the operation cannot accept
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Operation name not registered by this connector
    #[error("Unknown operation: {0}")]
    UnknownOperation(String),

    /// Telegram answered with a structured error body
    #[error(transparent)]
    Telegram(#[from] TelegramApiError),

    /// Transport failure without a structured body, passed through as-is
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Config file parse error
    #[error("Config parse error: {0}")]
    TomlDe(#[from] toml::de::Error),

    /// Config render error
    #[error("Config render error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

/// Result type alias for connector operations
pub type Result<T> = std::result::Result<T, Error>;
