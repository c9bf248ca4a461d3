use crate::{
    error::EngineError,
    plan::{QueryPlan, Strategy, plan},
    registry::ProviderRegistry,
};
use connectors::provider::ResourceProvider;
use engine_config::ValidatedSettings;
use expression_engine::matching;
use futures::{StreamExt, TryStreamExt, future::try_join_all, stream};
use model::records::{resource::Resource, resource_type::ResourceType};
use planner::Predicate;
use std::{collections::HashSet, sync::Arc};
use tracing::{debug, info};

/// Runs filtered queries across every backend registered for a resource type.
///
/// Backend results are supersets of the filter's matches. The executor
/// re-applies the original filter to each backend's listing before merging,
/// so the result is exact whatever each backend could evaluate natively, and
/// a resource held by several backends is kept if any copy matches.
pub struct QueryExecutor {
    registry: Arc<ProviderRegistry>,
    settings: ValidatedSettings,
}

impl QueryExecutor {
    pub fn new(registry: Arc<ProviderRegistry>, settings: ValidatedSettings) -> Self {
        Self { registry, settings }
    }

    pub fn settings(&self) -> &ValidatedSettings {
        &self.settings
    }

    /// One plan per backend serving `resource_type`, in registration order.
    pub fn explain(
        &self,
        resource_type: ResourceType,
        predicate: &Predicate,
    ) -> Result<Vec<QueryPlan>, EngineError> {
        self.registry
            .providers_for(resource_type)
            .iter()
            .map(|provider| plan(provider.oracle(), predicate, &self.settings))
            .collect()
    }

    pub async fn execute(
        &self,
        resource_type: ResourceType,
        predicate: Option<&Predicate>,
    ) -> Result<Vec<Resource>, EngineError> {
        let providers = self.registry.providers_for(resource_type);

        let fetches = providers
            .iter()
            .map(|provider| self.fetch_backend(provider.as_ref(), predicate));
        let per_backend = try_join_all(fetches).await?;
        let result = union(per_backend);

        info!(
            resource_type = %resource_type,
            backends = providers.len(),
            matched = result.len(),
            "Query completed"
        );
        Ok(result)
    }

    /// Resources of one backend matching `predicate`.
    async fn fetch_backend(
        &self,
        provider: &dyn ResourceProvider,
        predicate: Option<&Predicate>,
    ) -> Result<Vec<Resource>, EngineError> {
        let Some(predicate) = predicate else {
            return Ok(provider.fetch(None).await?);
        };

        let candidates = self.fetch_candidates(provider, predicate).await?;
        let fetched = candidates.len();
        let matched = matching(predicate, candidates);
        debug!(
            backend = %provider.name(),
            fetched,
            matched = matched.len(),
            "Post-filtered backend listing"
        );
        Ok(matched)
    }

    /// Superset of the backend's matches, as planned for its capabilities.
    async fn fetch_candidates(
        &self,
        provider: &dyn ResourceProvider,
        predicate: &Predicate,
    ) -> Result<Vec<Resource>, EngineError> {
        let plan = plan(provider.oracle(), predicate, &self.settings)?;
        match plan.strategy {
            Strategy::FetchAll { reason } => {
                debug!(backend = %provider.name(), "Fetching all resources: {reason}");
                Ok(provider.fetch(None).await?)
            }
            Strategy::Clauses(clauses) => {
                debug!(
                    backend = %provider.name(),
                    clauses = clauses.len(),
                    "Issuing filtered fetches"
                );
                let listings: Vec<Vec<Resource>> = stream::iter(clauses.iter())
                    .map(|clause| provider.fetch(Some(clause)))
                    .buffered(self.settings.concurrent_fetches())
                    .try_collect()
                    .await?;
                Ok(union(listings))
            }
        }
    }
}

/// Concatenates listings, dropping resources whose key was already seen.
fn union(listings: Vec<Vec<Resource>>) -> Vec<Resource> {
    let mut seen = HashSet::new();
    listings
        .into_iter()
        .flatten()
        .filter(|resource| seen.insert(resource.key()))
        .collect()
}
