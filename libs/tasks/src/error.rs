//! Error taxonomy shared by every domain operation

use common::error::StoreError;
use thiserror::Error;

/// Outcome of a failed domain operation
///
/// Every variant is a local, synchronous result: the stores are left exactly
/// as they were before the call.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Missing or malformed input
    #[error("{0}")]
    Validation(String),

    /// Absent resource, or one owned by someone else
    #[error("{0}")]
    NotFound(String),

    /// Duplicate registration or redundant state transition
    #[error("{0}")]
    Conflict(String),

    /// Unexpected failure inside a store
    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    pub fn validation(message: impl Into<String>) -> Self {
        DomainError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        DomainError::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        DomainError::Conflict(message.into())
    }

    /// The task lookup failure used by every owner-scoped operation
    pub fn task_not_found() -> Self {
        DomainError::not_found("Tarefa não encontrada")
    }
}

impl From<StoreError> for DomainError {
    fn from(err: StoreError) -> Self {
        DomainError::Internal(err.to_string())
    }
}

/// Type alias for domain results
pub type DomainResult<T> = Result<T, DomainError>;
