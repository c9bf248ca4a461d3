use crate::{
    core::{identifiers::PropertyId, identifiers::ResourceKey, value::Value},
    records::resource_type::ResourceType,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single infrastructure resource and its property values.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    pub resource_type: ResourceType,
    pub properties: BTreeMap<PropertyId, Value>,
}

impl Resource {
    pub fn new(resource_type: ResourceType) -> Self {
        Resource {
            resource_type,
            properties: BTreeMap::new(),
        }
    }

    pub fn with(mut self, property: PropertyId, value: impl Into<Value>) -> Self {
        self.set(property, value);
        self
    }

    pub fn set(&mut self, property: PropertyId, value: impl Into<Value>) {
        self.properties.insert(property, value.into());
    }

    pub fn get(&self, property: &PropertyId) -> Option<&Value> {
        self.properties.get(property)
    }

    /// True if at least one property lives in `category` or below it.
    pub fn has_category(&self, category: &str) -> bool {
        self.properties.keys().any(|id| id.is_in_category(category))
    }

    /// Identity built from the type's key properties. Missing keys render as
    /// empty segments, so two partially populated resources may collide.
    pub fn key(&self) -> ResourceKey {
        let parts = self
            .resource_type
            .key_property_ids()
            .iter()
            .map(|id| {
                self.get(id)
                    .and_then(Value::as_string)
                    .unwrap_or_default()
            })
            .collect::<Vec<_>>();
        ResourceKey::new(format!("{}:{}", self.resource_type, parts.join("/")))
    }
}
