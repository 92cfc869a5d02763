use thiserror::Error;
use uuid::Uuid;

use crate::domain::error::{DomainError, RepoError};

/// Errors that are safe to expose to other modules
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UsersError {
    #[error("User not found: {id}")]
    NotFound { id: Uuid },

    #[error("Invalid user id")]
    InvalidId,

    #[error("Internal error")]
    Internal,
}

impl UsersError {
    pub fn not_found(id: Uuid) -> Self {
        Self::NotFound { id }
    }

    pub fn internal() -> Self {
        Self::Internal
    }
}

impl From<DomainError> for UsersError {
    fn from(domain_error: DomainError) -> Self {
        match domain_error {
            DomainError::InvalidId => Self::InvalidId,
            DomainError::Repository {
                source: RepoError::NotFound { id },
                ..
            } => Self::not_found(id),
            DomainError::Repository {
                source: RepoError::Storage(_),
                ..
            } => Self::internal(),
        }
    }
}
