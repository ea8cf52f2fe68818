use thiserror::Error;

/// Errors reported by [`Forest`](crate::Forest) operations.
///
/// Every error is raised before the tree is touched, so a failed call
/// leaves all trees exactly as they were.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TreeError {
    #[error("key {0} is already present")]
    DuplicateKey(i64),
    #[error("key {0} not found")]
    NotFound(i64),
    #[error("precondition violated for key {key}: {reason}")]
    PreconditionViolated { key: i64, reason: &'static str },
}
