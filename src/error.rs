//! Error types for the help plugin

use thiserror::Error;

/// Result type alias for help plugin operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building or rendering the command catalog
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Host plugin registry could not be queried
    #[error("plugin registry error: {0}")]
    Registry(String),

    /// Help image rendering failed
    #[error("render error: {0}")]
    Render(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}
