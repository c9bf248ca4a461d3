pub mod error;
pub mod loader;
pub mod settings;

pub use error::ConfigError;
pub use loader::{load_config, parse_config};
pub use settings::validated::{ValidatedBackend, ValidatedConfig, ValidatedSettings};
