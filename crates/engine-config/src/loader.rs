use crate::{
    error::ConfigError,
    settings::{RawConfig, validated::ValidatedConfig, validator::ConfigValidator},
};
use std::path::Path;
use tracing::info;

/// Reads and validates the engine configuration at `path`.
pub async fn load_config(path: impl AsRef<Path>) -> Result<ValidatedConfig, ConfigError> {
    let path = path.as_ref();
    info!("Loading configuration from {}", path.display());
    let contents = tokio::fs::read_to_string(path).await?;
    parse_config(&contents)
}

pub fn parse_config(contents: &str) -> Result<ValidatedConfig, ConfigError> {
    let raw: RawConfig = serde_json::from_str(contents)?;
    ConfigValidator::validate(raw)
}
