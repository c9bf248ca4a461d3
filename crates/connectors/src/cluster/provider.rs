use crate::{cluster::definition::ClusterDefinition, error::ProviderError, provider::ResourceProvider};
use async_trait::async_trait;
use expression_engine::matching;
use model::{
    core::identifiers::PropertyId,
    records::{resource::Resource, resource_type::ResourceType},
};
use planner::{CapabilityOracle, Predicate, SchemaOracle};
use std::collections::BTreeSet;
use tracing::debug;

/// In-memory listing of one resource type, typically built from a static
/// cluster definition.
pub struct StaticResourceProvider {
    name: String,
    resource_type: ResourceType,
    resources: Vec<Resource>,
    oracle: SchemaOracle,
}

impl StaticResourceProvider {
    /// Provider whose oracle accepts the type's whole schema.
    pub fn new(name: impl Into<String>, resource_type: ResourceType, resources: Vec<Resource>) -> Self {
        let name = name.into();
        let oracle = SchemaOracle::new(name.clone(), resource_type.property_ids());
        Self {
            name,
            resource_type,
            resources,
            oracle,
        }
    }

    pub fn from_definition(
        name: impl Into<String>,
        definition: &ClusterDefinition,
        resource_type: ResourceType,
    ) -> Self {
        Self::new(name, resource_type, definition.resources(resource_type))
    }

    /// Restricts native evaluation to `properties`. Ids outside the type's
    /// schema are ignored.
    pub fn with_native_properties(mut self, properties: impl IntoIterator<Item = PropertyId>) -> Self {
        let schema: BTreeSet<PropertyId> = self.resource_type.property_ids().into_iter().collect();
        let native = properties.into_iter().filter(|id| schema.contains(id));
        self.oracle = SchemaOracle::new(self.name.clone(), native);
        self
    }

    pub fn native_properties(&self) -> &BTreeSet<PropertyId> {
        self.oracle.supported()
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    fn check_clause(&self, clause: &Predicate) -> Result<(), ProviderError> {
        let referenced: BTreeSet<PropertyId> = clause.property_ids().into_iter().collect();
        let unsupported = self
            .oracle
            .unsupported(&referenced)
            .map_err(|e| ProviderError::Unavailable {
                backend: self.name.clone(),
                reason: e.to_string(),
            })?;
        if unsupported.is_empty() {
            Ok(())
        } else {
            Err(ProviderError::UnsupportedClause {
                backend: self.name.clone(),
                clause: clause.to_string(),
            })
        }
    }
}

#[async_trait]
impl ResourceProvider for StaticResourceProvider {
    fn name(&self) -> &str {
        &self.name
    }

    fn resource_type(&self) -> ResourceType {
        self.resource_type
    }

    fn oracle(&self) -> &(dyn CapabilityOracle + Send + Sync) {
        &self.oracle
    }

    async fn fetch(&self, filter: Option<&Predicate>) -> Result<Vec<Resource>, ProviderError> {
        let Some(clause) = filter else {
            return Ok(self.resources.clone());
        };

        self.check_clause(clause)?;
        let matched = matching(clause, self.resources.clone());
        debug!(
            backend = %self.name,
            matched = matched.len(),
            total = self.resources.len(),
            "Evaluated clause {clause}"
        );
        Ok(matched)
    }
}
