use crate::error::ProviderError;
use async_trait::async_trait;
use model::records::{resource::Resource, resource_type::ResourceType};
use planner::{CapabilityOracle, Predicate};

/// A backend serving resources of one type.
#[async_trait]
pub trait ResourceProvider: Send + Sync {
    /// Backend name, unique within a registry.
    fn name(&self) -> &str;

    fn resource_type(&self) -> ResourceType;

    /// Which properties this backend can evaluate natively.
    fn oracle(&self) -> &(dyn CapabilityOracle + Send + Sync);

    /// Fetches resources. With `None` every resource of the type is returned;
    /// with a clause the result contains at least every resource matching it.
    async fn fetch(&self, filter: Option<&Predicate>) -> Result<Vec<Resource>, ProviderError>;
}
