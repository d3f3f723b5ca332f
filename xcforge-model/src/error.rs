use thiserror::Error;

/// Result type for model construction.
pub type Result<T> = std::result::Result<T, ModelError>;

/// Errors raised while building a [`Project`](crate::Project).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("a target named '{0}' already exists in the project")]
    DuplicateTarget(String),

    #[error("no target named '{0}' in the project")]
    UnknownTarget(String),

    #[error("target '{target}' has no {field}")]
    MissingField { target: String, field: &'static str },
}
