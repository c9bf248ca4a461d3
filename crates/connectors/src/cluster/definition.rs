use crate::error::ProviderError;
use model::records::{resource::Resource, resource_type::ResourceType};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

fn default_state() -> String {
    "INSTALLED".to_string()
}

fn default_host_status() -> String {
    "HEALTHY".to_string()
}

/// Static description of one cluster: its services, their components and the
/// hosts each component is deployed on.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ClusterDefinition {
    pub cluster_name: String,
    #[serde(default)]
    pub version: Option<String>,
    #[serde(default)]
    pub services: BTreeMap<String, ServiceDefinition>,
    #[serde(default)]
    pub hosts: BTreeMap<String, HostDefinition>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ServiceDefinition {
    #[serde(default = "default_state")]
    pub state: String,
    /// Component name to the hosts running it.
    #[serde(default)]
    pub components: BTreeMap<String, Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HostDefinition {
    #[serde(default = "default_host_status")]
    pub host_status: String,
    #[serde(default)]
    pub total_mem: Option<u64>,
    #[serde(default)]
    pub cpu_count: Option<u64>,
}

impl Default for HostDefinition {
    fn default() -> Self {
        Self {
            host_status: default_host_status(),
            total_mem: None,
            cpu_count: None,
        }
    }
}

impl ClusterDefinition {
    pub fn validate(&self) -> Result<(), ProviderError> {
        if self.cluster_name.trim().is_empty() {
            return Err(ProviderError::InvalidDefinition(
                "cluster_name must not be empty".into(),
            ));
        }
        for (service, def) in &self.services {
            for (component, hosts) in &def.components {
                if hosts.iter().any(|h| h.trim().is_empty()) {
                    return Err(ProviderError::InvalidDefinition(format!(
                        "component '{service}/{component}' lists an empty host name"
                    )));
                }
            }
        }
        Ok(())
    }

    /// Host definitions, including hosts only referenced by components.
    fn all_hosts(&self) -> BTreeMap<String, HostDefinition> {
        let mut hosts = self.hosts.clone();
        for def in self.services.values() {
            for host in def.components.values().flatten() {
                hosts.entry(host.clone()).or_default();
            }
        }
        hosts
    }

    /// Materialises every resource of `resource_type` described by this cluster.
    pub fn resources(&self, resource_type: ResourceType) -> Vec<Resource> {
        let kind = resource_type;
        let base = || Resource::new(kind).with(kind.property_id("cluster_name"), self.cluster_name.as_str());

        match kind {
            ResourceType::Cluster => {
                let mut cluster = base();
                if let Some(version) = &self.version {
                    cluster.set(kind.property_id("version"), version.as_str());
                }
                vec![cluster]
            }
            ResourceType::Service => self
                .services
                .iter()
                .map(|(name, def)| {
                    base()
                        .with(kind.property_id("service_name"), name.as_str())
                        .with(kind.property_id("state"), def.state.as_str())
                })
                .collect(),
            ResourceType::Component => self
                .services
                .iter()
                .flat_map(|(service, def)| {
                    def.components.keys().map(move |component| (service, def, component))
                })
                .map(|(service, def, component)| {
                    base()
                        .with(kind.property_id("service_name"), service.as_str())
                        .with(kind.property_id("component_name"), component.as_str())
                        .with(kind.property_id("state"), def.state.as_str())
                })
                .collect(),
            ResourceType::Host => self
                .all_hosts()
                .into_iter()
                .map(|(name, def)| {
                    let mut host = base()
                        .with(kind.property_id("host_name"), name)
                        .with(kind.property_id("host_status"), def.host_status);
                    if let Some(mem) = def.total_mem {
                        host.set(kind.property_id("total_mem"), mem);
                    }
                    if let Some(cpus) = def.cpu_count {
                        host.set(kind.property_id("cpu_count"), cpus);
                    }
                    host
                })
                .collect(),
            ResourceType::HostComponent => {
                let mut out = Vec::new();
                for (service, def) in &self.services {
                    for (component, hosts) in &def.components {
                        for host in hosts {
                            out.push(
                                base()
                                    .with(kind.property_id("host_name"), host.as_str())
                                    .with(kind.property_id("component_name"), component.as_str())
                                    .with(kind.property_id("service_name"), service.as_str())
                                    .with(kind.property_id("state"), def.state.as_str()),
                            );
                        }
                    }
                }
                out
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model::core::value::Value;

    fn definition() -> ClusterDefinition {
        serde_json::from_str(
            r#"{
                "cluster_name": "c1",
                "version": "HDP-1.2.0",
                "services": {
                    "HDFS": {"state": "STARTED", "components": {"NAMENODE": ["h1"], "DATANODE": ["h1", "h2"]}},
                    "ZOOKEEPER": {"components": {"ZOOKEEPER_SERVER": ["h3"]}}
                },
                "hosts": {"h1": {"total_mem": 8192, "cpu_count": 4}}
            }"#,
        )
        .unwrap()
    }

    #[test]
    fn test_services_carry_state_defaults() {
        let services = definition().resources(ResourceType::Service);
        assert_eq!(services.len(), 2);
        let zk = &services[1];
        assert_eq!(
            zk.get(&ResourceType::Service.property_id("state")),
            Some(&Value::from("INSTALLED"))
        );
    }

    #[test]
    fn test_hosts_include_component_only_hosts() {
        let hosts = definition().resources(ResourceType::Host);
        let names: Vec<_> = hosts
            .iter()
            .map(|h| h.get(&ResourceType::Host.property_id("host_name")).cloned().unwrap())
            .collect();
        assert_eq!(names, vec![Value::from("h1"), Value::from("h2"), Value::from("h3")]);
        assert_eq!(
            hosts[0].get(&ResourceType::Host.property_id("total_mem")),
            Some(&Value::Uint(8192))
        );
        assert_eq!(hosts[1].get(&ResourceType::Host.property_id("total_mem")), None);
    }

    #[test]
    fn test_host_components_expand_per_host() {
        let hcs = definition().resources(ResourceType::HostComponent);
        assert_eq!(hcs.len(), 4);
        let keys: Vec<_> = hcs.iter().map(|r| r.key().to_string()).collect();
        assert!(keys.contains(&"host_component:c1/h2/DATANODE".to_string()));
    }

    #[test]
    fn test_validate_rejects_blank_cluster() {
        let mut def = definition();
        def.cluster_name = " ".into();
        assert!(matches!(
            def.validate(),
            Err(ProviderError::InvalidDefinition(_))
        ));
    }
}
