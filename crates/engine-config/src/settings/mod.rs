use connectors::cluster::definition::ClusterDefinition;
use model::records::resource_type::ResourceType;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub mod validated;
pub mod validator;

/// Configuration file as written by the operator, before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawConfig {
    #[serde(default)]
    pub settings: QuerySettings,
    #[serde(default)]
    pub backends: Vec<BackendConfig>,
}

/// Tunables for query execution. Unset fields take their defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QuerySettings {
    /// Longest clause list issued to a backend before falling back to an
    /// unfiltered fetch.
    #[serde(default)]
    pub max_clauses: Option<usize>,
    /// Clause queries in flight per backend.
    #[serde(default)]
    pub concurrent_fetches: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendConfig {
    pub name: String,
    pub cluster: ClusterDefinition,
    /// Per resource type, the properties this backend evaluates natively.
    /// Types not listed support their whole schema.
    #[serde(default)]
    pub native_properties: BTreeMap<ResourceType, Vec<String>>,
}
