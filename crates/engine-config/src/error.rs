use thiserror::Error;

/// Errors raised while loading or validating the engine configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read the configuration file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse the configuration file as JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration validation failed: {}", .0.join("; "))]
    ValidationFailed(Vec<String>),
}
