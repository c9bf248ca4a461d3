use crate::error::OracleError;
use model::core::identifiers::PropertyId;
use std::collections::BTreeSet;

/// Per-backend declaration of which properties it can evaluate natively.
pub trait CapabilityOracle {
    /// Name of the backend, used in errors and logs.
    fn backend(&self) -> &str;

    /// Returns the subset of `properties` this backend cannot evaluate.
    fn unsupported(
        &self,
        properties: &BTreeSet<PropertyId>,
    ) -> Result<BTreeSet<PropertyId>, OracleError>;
}

/// Oracle backed by a fixed set of natively evaluable property ids.
///
/// A queried id naming a whole category is supported when some supported
/// property lives in that category.
#[derive(Debug, Clone)]
pub struct SchemaOracle {
    backend: String,
    supported: BTreeSet<PropertyId>,
}

impl SchemaOracle {
    pub fn new(backend: impl Into<String>, supported: impl IntoIterator<Item = PropertyId>) -> Self {
        Self {
            backend: backend.into(),
            supported: supported.into_iter().collect(),
        }
    }

    pub fn supported(&self) -> &BTreeSet<PropertyId> {
        &self.supported
    }

    fn supports(&self, property: &PropertyId) -> bool {
        if property.is_category() {
            return self
                .supported
                .iter()
                .any(|id| id.is_in_category(property.category()));
        }
        self.supported.contains(property)
    }
}

impl CapabilityOracle for SchemaOracle {
    fn backend(&self) -> &str {
        &self.backend
    }

    fn unsupported(
        &self,
        properties: &BTreeSet<PropertyId>,
    ) -> Result<BTreeSet<PropertyId>, OracleError> {
        Ok(properties
            .iter()
            .filter(|id| !self.supports(id))
            .cloned()
            .collect())
    }
}
