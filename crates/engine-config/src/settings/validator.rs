use crate::{
    error::ConfigError,
    settings::{
        BackendConfig, QuerySettings, RawConfig,
        validated::{ValidatedBackend, ValidatedConfig, ValidatedSettings, ValidatedSettingsBuilder},
    },
};
use model::core::identifiers::PropertyId;
use std::collections::{BTreeMap, BTreeSet, HashSet};
use tracing::{info, warn};

/// Validates a raw configuration before the engine is built from it.
/// Every problem is collected so the operator sees them all at once.
pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate(raw: RawConfig) -> Result<ValidatedConfig, ConfigError> {
        info!("Validating configuration with {} backend(s)", raw.backends.len());

        let mut errors: Vec<String> = Vec::new();
        let settings = Self::validate_settings(&raw.settings, &mut errors);

        let mut seen = HashSet::new();
        let mut backends = Vec::with_capacity(raw.backends.len());
        for backend in raw.backends {
            if let Some(validated) = Self::validate_backend(backend, &mut seen, &mut errors) {
                backends.push(validated);
            }
        }

        if backends.is_empty() && errors.is_empty() {
            warn!("No backends configured, every query will return no resources");
        }

        if !errors.is_empty() {
            return Err(ConfigError::ValidationFailed(errors));
        }

        info!(
            "Configuration validated: max_clauses={}, concurrent_fetches={}, backends={}",
            settings.max_clauses(),
            settings.concurrent_fetches(),
            backends.len()
        );

        Ok(ValidatedConfig { settings, backends })
    }

    fn validate_settings(settings: &QuerySettings, errors: &mut Vec<String>) -> ValidatedSettings {
        let mut builder = ValidatedSettingsBuilder::new();

        match settings.max_clauses {
            Some(0) => errors.push("max_clauses must be at least 1".to_string()),
            Some(n) => {
                if n > 10_000 {
                    warn!("max_clauses {} is very large, backends may reject long filters", n);
                }
                builder.max_clauses(n);
            }
            None => {}
        }

        match settings.concurrent_fetches {
            Some(0) => errors.push("concurrent_fetches must be at least 1".to_string()),
            Some(n) => {
                builder.concurrent_fetches(n);
            }
            None => {}
        }

        builder.build()
    }

    fn validate_backend(
        backend: BackendConfig,
        seen: &mut HashSet<String>,
        errors: &mut Vec<String>,
    ) -> Option<ValidatedBackend> {
        let before = errors.len();
        let name = backend.name.trim().to_string();

        if name.is_empty() {
            errors.push("Backend name must not be empty".to_string());
        } else if !seen.insert(name.clone()) {
            errors.push(format!("Duplicate backend name '{}'", name));
        }

        if let Err(err) = backend.cluster.validate() {
            errors.push(format!("Backend '{}': {}", name, err));
        }

        let mut native_properties = BTreeMap::new();
        for (resource_type, properties) in backend.native_properties {
            let mut parsed = BTreeSet::new();
            for raw in properties {
                match raw.parse::<PropertyId>() {
                    Ok(id) if id.is_in_category(resource_type.category()) => {
                        parsed.insert(id);
                    }
                    Ok(id) => errors.push(format!(
                        "Backend '{}': property '{}' does not belong to category '{}' of {}",
                        name,
                        id,
                        resource_type.category(),
                        resource_type
                    )),
                    Err(err) => errors.push(format!("Backend '{}': {}", name, err)),
                }
            }
            native_properties.insert(resource_type, parsed);
        }

        (errors.len() == before).then(|| ValidatedBackend {
            name,
            cluster: backend.cluster,
            native_properties,
        })
    }
}
