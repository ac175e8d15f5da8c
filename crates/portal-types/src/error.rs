//! Error types for the school portal.

use std::io;

/// Errors produced by the portal framework.
#[derive(Debug, thiserror::Error)]
pub enum PortalError {
    #[error("data error: {0}")]
    Data(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("view error: {0}")]
    View(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, PortalError>;
