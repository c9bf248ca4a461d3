use connectors::cluster::definition::ClusterDefinition;
use model::{core::identifiers::PropertyId, records::resource_type::ResourceType};
use std::collections::{BTreeMap, BTreeSet};

pub const DEFAULT_MAX_CLAUSES: usize = 64;
pub const DEFAULT_CONCURRENT_FETCHES: usize = 8;

/// Immutable, validated query settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedSettings {
    pub max_clauses: usize,
    pub concurrent_fetches: usize,
}

impl Default for ValidatedSettings {
    fn default() -> Self {
        Self {
            max_clauses: DEFAULT_MAX_CLAUSES,
            concurrent_fetches: DEFAULT_CONCURRENT_FETCHES,
        }
    }
}

impl ValidatedSettings {
    pub fn from_builder(builder: ValidatedSettingsBuilder) -> Self {
        Self {
            max_clauses: builder.max_clauses.unwrap_or(DEFAULT_MAX_CLAUSES),
            concurrent_fetches: builder
                .concurrent_fetches
                .unwrap_or(DEFAULT_CONCURRENT_FETCHES),
        }
    }

    pub fn max_clauses(&self) -> usize {
        self.max_clauses
    }

    pub fn concurrent_fetches(&self) -> usize {
        self.concurrent_fetches
    }
}

#[derive(Debug, Default)]
pub struct ValidatedSettingsBuilder {
    pub max_clauses: Option<usize>,
    pub concurrent_fetches: Option<usize>,
}

impl ValidatedSettingsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn max_clauses(&mut self, value: usize) -> &mut Self {
        self.max_clauses = Some(value);
        self
    }

    pub fn concurrent_fetches(&mut self, value: usize) -> &mut Self {
        self.concurrent_fetches = Some(value);
        self
    }

    pub fn build(self) -> ValidatedSettings {
        ValidatedSettings::from_builder(self)
    }
}

#[derive(Debug, Clone)]
pub struct ValidatedBackend {
    pub name: String,
    pub cluster: ClusterDefinition,
    pub native_properties: BTreeMap<ResourceType, BTreeSet<PropertyId>>,
}

impl ValidatedBackend {
    /// Native properties for `resource_type`, or `None` when the backend
    /// supports the type's whole schema.
    pub fn native_for(&self, resource_type: ResourceType) -> Option<&BTreeSet<PropertyId>> {
        self.native_properties.get(&resource_type)
    }
}

#[derive(Debug, Clone, Default)]
pub struct ValidatedConfig {
    pub settings: ValidatedSettings,
    pub backends: Vec<ValidatedBackend>,
}
