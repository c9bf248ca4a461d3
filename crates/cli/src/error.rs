use engine_config::ConfigError;
use engine_core::EngineError;
use model::core::errors::ModelError;
use planner::PushdownError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Failed to read file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid filter: {0}")]
    Filter(#[from] PushdownError),

    #[error("Invalid resource type: {0}")]
    Resource(#[from] ModelError),

    #[error("Query failed: {0}")]
    Engine(#[from] EngineError),

    #[error("Failed to serialize data to JSON: {0}")]
    JsonSerialize(#[from] serde_json::Error),
}
