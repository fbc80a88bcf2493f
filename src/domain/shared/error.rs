//! Domain errors

use thiserror::Error;

/// Domain result type
pub type Result<T> = std::result::Result<T, DomainError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Invalid identifier: {0}")]
    InvalidIdentifier(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl DomainError {
    /// The message without the kind prefix, as shown to API callers
    pub fn message(&self) -> &str {
        match self {
            DomainError::NotFound(msg)
            | DomainError::InvalidIdentifier(msg)
            | DomainError::ValidationError(msg)
            | DomainError::StoreUnavailable(msg)
            | DomainError::Store(msg)
            | DomainError::Internal(msg) => msg,
        }
    }
}
