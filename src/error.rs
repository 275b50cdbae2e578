//! Error types for the estimation engine.

use std::io;

use thiserror::Error;

/// Errors that can occur while estimating or comparing scenarios.
#[derive(Error, Debug)]
pub enum VibecastError {
    /// Caller supplied input the engine cannot work with (empty scenario
    /// list, dangling data-flow edge, out-of-range percentage).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Configuration could not be loaded or deserialized.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Configuration loaded but holds values the engine rejects.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// Configuration could not be rendered as TOML.
    #[error("TOML error: {0}")]
    Toml(#[from] toml::ser::Error),

    /// IO error while reading inputs.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl VibecastError {
    /// Shorthand for building a [`VibecastError::InvalidInput`].
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Whether this error was caused by the caller's input.
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, VibecastError::InvalidInput(_))
    }
}

/// Result type for engine operations.
pub type Result<T> = std::result::Result<T, VibecastError>;
