use thiserror::Error;

/// Errors raised while building or compiling a predicate.
#[derive(Debug, Error)]
pub enum PushdownError {
    /// The predicate tree is malformed. This is a caller bug and never retried.
    #[error("Invalid predicate: {0}")]
    InvalidPredicate(String),

    /// The backend could not answer a capability query. Callers fall back to
    /// an unfiltered fetch for that backend.
    #[error("Capability oracle for backend '{backend}' is unavailable: {source}")]
    OracleUnavailable {
        backend: String,
        #[source]
        source: OracleError,
    },
}

impl PushdownError {
    pub fn invalid(message: impl Into<String>) -> Self {
        PushdownError::InvalidPredicate(message.into())
    }

    pub fn is_oracle_unavailable(&self) -> bool {
        matches!(self, PushdownError::OracleUnavailable { .. })
    }
}

impl From<serde_json::Error> for PushdownError {
    fn from(err: serde_json::Error) -> Self {
        PushdownError::InvalidPredicate(err.to_string())
    }
}

/// Failures reported by a capability oracle.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum OracleError {
    #[error("backend unreachable: {0}")]
    Unreachable(String),

    #[error("capability query failed: {0}")]
    Query(String),
}
