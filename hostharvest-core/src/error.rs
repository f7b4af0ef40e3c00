//! Core error types for `HostHarvest`.

use thiserror::Error;

/// Core error type for `HostHarvest` configuration and I/O.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error while reading or writing configuration.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
