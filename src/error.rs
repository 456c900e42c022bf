//! Error types for cohere.

use thiserror::Error;

/// Errors that can occur while running cohere.
#[derive(Error, Debug)]
pub enum CohereError {
    /// Configuration could not be read, parsed, or written.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Terminal setup, drawing, or input failed.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// A value could not be parsed or serialized.
    #[error("Parse error: {0}")]
    Parse(String),

    /// An operation was requested in a session state that does not allow it.
    #[error("Invalid state: {0}")]
    InvalidState(String),

    /// A platform facility is not available on this system.
    #[error("Not supported: {0}")]
    NotSupported(String),

    /// Underlying I/O failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for CohereError {
    fn from(e: serde_json::Error) -> Self {
        Self::Parse(format!("JSON: {e}"))
    }
}

impl From<serde_yaml::Error> for CohereError {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Parse(format!("YAML: {e}"))
    }
}

impl CohereError {
    /// Wrap a terminal backend failure with a short description of what was attempted.
    pub fn terminal(what: &str, e: impl std::fmt::Display) -> Self {
        Self::Terminal(format!("{what}: {e}"))
    }
}
