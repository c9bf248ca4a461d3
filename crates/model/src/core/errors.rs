use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ModelError {
    #[error("invalid property id '{0}': the leaf name is empty")]
    InvalidPropertyId(String),

    #[error("unknown resource type: {0}")]
    UnknownResourceType(String),
}
