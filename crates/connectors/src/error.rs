use thiserror::Error;

/// Errors raised by resource providers.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// The backend could not be reached or failed to answer.
    #[error("Backend '{backend}' unavailable: {reason}")]
    Unavailable { backend: String, reason: String },

    /// A clause referenced properties the backend cannot evaluate natively.
    #[error("Backend '{backend}' cannot evaluate clause: {clause}")]
    UnsupportedClause { backend: String, clause: String },

    /// The static cluster definition is inconsistent.
    #[error("Invalid cluster definition: {0}")]
    InvalidDefinition(String),
}
