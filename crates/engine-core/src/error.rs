use connectors::error::ProviderError;
use model::records::resource_type::ResourceType;
use planner::PushdownError;
use thiserror::Error;

/// Top-level errors for query execution.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The filter could not be compiled. The query is aborted.
    #[error("Invalid predicate: {0}")]
    InvalidPredicate(String),

    /// A backend failed while serving a fetch.
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Backend '{name}' is already registered for {resource_type}")]
    DuplicateBackend {
        name: String,
        resource_type: ResourceType,
    },

    #[error("Pushdown error: {0}")]
    Pushdown(PushdownError),
}

impl From<PushdownError> for EngineError {
    fn from(err: PushdownError) -> Self {
        match err {
            PushdownError::InvalidPredicate(msg) => EngineError::InvalidPredicate(msg),
            other => EngineError::Pushdown(other),
        }
    }
}
