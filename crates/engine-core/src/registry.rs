use crate::error::EngineError;
use connectors::{cluster::provider::StaticResourceProvider, provider::ResourceProvider};
use engine_config::ValidatedConfig;
use model::records::resource_type::ResourceType;
use std::{collections::BTreeMap, sync::Arc};
use tracing::{debug, info};

/// Providers grouped by the resource type they serve, in registration order.
#[derive(Default, Clone)]
pub struct ProviderRegistry {
    providers: BTreeMap<ResourceType, Vec<Arc<dyn ResourceProvider>>>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// One static provider per configured backend and resource type.
    pub fn from_config(config: &ValidatedConfig) -> Result<Self, EngineError> {
        let mut registry = Self::new();

        for backend in &config.backends {
            for resource_type in ResourceType::ALL {
                let mut provider =
                    StaticResourceProvider::from_definition(&backend.name, &backend.cluster, resource_type);
                if let Some(native) = backend.native_for(resource_type) {
                    provider = provider.with_native_properties(native.iter().cloned());
                }
                debug!(
                    backend = %backend.name,
                    resource_type = %resource_type,
                    resources = provider.len(),
                    "Built static provider"
                );
                registry.register(Arc::new(provider))?;
            }
        }

        info!(
            "Registered {} provider(s) across {} backend(s)",
            registry.len(),
            config.backends.len()
        );
        Ok(registry)
    }

    pub fn register(&mut self, provider: Arc<dyn ResourceProvider>) -> Result<(), EngineError> {
        let resource_type = provider.resource_type();
        let entry = self.providers.entry(resource_type).or_default();

        if entry.iter().any(|p| p.name() == provider.name()) {
            return Err(EngineError::DuplicateBackend {
                name: provider.name().to_string(),
                resource_type,
            });
        }

        entry.push(provider);
        Ok(())
    }

    pub fn providers_for(&self, resource_type: ResourceType) -> &[Arc<dyn ResourceProvider>] {
        self.providers
            .get(&resource_type)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.providers.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
