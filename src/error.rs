//! Borgdeck error types.
//!
//! The compression spec codec and the archive utilities are total and never
//! return errors; everything that can fail lives on the HTTP and config
//! boundaries. Network failures carry the rendered reqwest message rather
//! than the source error so callers are not forced onto reqwest's types.

use thiserror::Error;

/// Borgdeck client errors.
#[derive(Error, Debug)]
pub enum BorgdeckError {
    /// Network communication error.
    #[error("Network error: {0}")]
    Network(String),

    /// Backend answered with a non-success status code.
    #[error("API error: {endpoint} returned status {status}")]
    Api {
        /// Endpoint path that was requested.
        endpoint: String,
        /// HTTP status code from the backend.
        status: u16,
    },

    /// Repository does not exist on the backend.
    #[error("Repository not found: {0}")]
    RepositoryNotFound(String),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for Borgdeck operations
pub type Result<T> = std::result::Result<T, BorgdeckError>;

impl From<reqwest::Error> for BorgdeckError {
    fn from(err: reqwest::Error) -> Self {
        BorgdeckError::Network(err.to_string())
    }
}

impl From<toml::de::Error> for BorgdeckError {
    fn from(err: toml::de::Error) -> Self {
        BorgdeckError::Config(err.to_string())
    }
}
