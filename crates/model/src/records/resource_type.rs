use crate::core::{errors::ModelError, identifiers::PropertyId};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Kinds of cluster infrastructure resources exposed by the query API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    Cluster,
    Service,
    Component,
    Host,
    HostComponent,
}

impl ResourceType {
    pub const ALL: [ResourceType; 5] = [
        ResourceType::Cluster,
        ResourceType::Service,
        ResourceType::Component,
        ResourceType::Host,
        ResourceType::HostComponent,
    ];

    /// Category under which this type's own properties live.
    pub fn category(&self) -> &'static str {
        match self {
            ResourceType::Cluster => "Clusters",
            ResourceType::Service => "ServiceInfo",
            ResourceType::Component => "ServiceComponentInfo",
            ResourceType::Host => "Hosts",
            ResourceType::HostComponent => "HostRoles",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ResourceType::Cluster => "cluster",
            ResourceType::Service => "service",
            ResourceType::Component => "component",
            ResourceType::Host => "host",
            ResourceType::HostComponent => "host_component",
        }
    }

    fn key_names(&self) -> &'static [&'static str] {
        match self {
            ResourceType::Cluster => &["cluster_name"],
            ResourceType::Service => &["cluster_name", "service_name"],
            ResourceType::Component => &["cluster_name", "service_name", "component_name"],
            ResourceType::Host => &["cluster_name", "host_name"],
            ResourceType::HostComponent => &["cluster_name", "host_name", "component_name"],
        }
    }

    fn attribute_names(&self) -> &'static [&'static str] {
        match self {
            ResourceType::Cluster => &["version"],
            ResourceType::Service => &["state"],
            ResourceType::Component => &["state"],
            ResourceType::Host => &["host_status", "total_mem", "cpu_count"],
            ResourceType::HostComponent => &["service_name", "state"],
        }
    }

    pub fn property_id(&self, name: &str) -> PropertyId {
        PropertyId::new(self.category(), name)
    }

    /// Properties that together identify a resource of this type.
    pub fn key_property_ids(&self) -> Vec<PropertyId> {
        self.key_names()
            .iter()
            .map(|name| self.property_id(name))
            .collect()
    }

    /// Every property a resource of this type may carry.
    pub fn property_ids(&self) -> Vec<PropertyId> {
        self.key_names()
            .iter()
            .chain(self.attribute_names())
            .map(|name| self.property_id(name))
            .collect()
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ResourceType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "cluster" | "clusters" => Ok(ResourceType::Cluster),
            "service" | "services" => Ok(ResourceType::Service),
            "component" | "components" => Ok(ResourceType::Component),
            "host" | "hosts" => Ok(ResourceType::Host),
            "host_component" | "host_components" => Ok(ResourceType::HostComponent),
            other => Err(ModelError::UnknownResourceType(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keys_are_part_of_schema() {
        for kind in ResourceType::ALL {
            let schema = kind.property_ids();
            for key in kind.key_property_ids() {
                assert!(schema.contains(&key), "{kind}: {key} missing from schema");
            }
        }
    }

    #[test]
    fn test_from_str_accepts_plural_and_dashes() {
        assert_eq!("Services".parse::<ResourceType>(), Ok(ResourceType::Service));
        assert_eq!(
            "host-component".parse::<ResourceType>(),
            Ok(ResourceType::HostComponent)
        );
        assert!("volume".parse::<ResourceType>().is_err());
    }
}
