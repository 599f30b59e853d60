//! Error types for reagent.

use thiserror::Error;

/// Primary error type for all reagent operations.
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid config file: {0}")]
    InvalidConfigFile(#[from] toml::de::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Authentication error: {0}")]
    Authentication(String),

    #[error("Rate limited: retry after {retry_after_ms:?}ms")]
    RateLimited { retry_after_ms: Option<u64> },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// The model asked for an action outside the closed tool set.
    #[error("Unknown action: {name}: {argument}")]
    UnknownAction { name: String, argument: String },
}

impl AgentError {
    /// Create an API error.
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Create an unknown-action error from the offending directive parts.
    pub fn unknown_action(name: impl Into<String>, argument: impl Into<String>) -> Self {
        Self::UnknownAction {
            name: name.into(),
            argument: argument.into(),
        }
    }
}

/// Convenience alias.
pub type Result<T> = std::result::Result<T, AgentError>;
