use thiserror::Error;
use uuid::Uuid;

/// Failures reported by a `UsersRepository` implementation.
#[derive(Error, Debug)]
pub enum RepoError {
    #[error("could not find user with id {id}")]
    NotFound { id: Uuid },

    #[error("storage failure: {0}")]
    Storage(#[from] anyhow::Error),
}

/// Domain-specific errors using thiserror
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("invalid user id")]
    InvalidId,

    #[error("{context}: {source}")]
    Repository {
        context: &'static str,
        #[source]
        source: RepoError,
    },
}

impl RepoError {
    pub fn not_found(id: Uuid) -> Self {
        Self::NotFound { id }
    }

    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage(anyhow::anyhow!(message.into()))
    }
}

impl DomainError {
    pub fn invalid_id() -> Self {
        Self::InvalidId
    }

    /// Wrap a repository failure with the operation that hit it.
    pub fn repository(context: &'static str, source: RepoError) -> Self {
        Self::Repository { context, source }
    }

    pub fn is_invalid_id(&self) -> bool {
        matches!(self, Self::InvalidId)
    }

    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::Repository {
                source: RepoError::NotFound { .. },
                ..
            }
        )
    }
}
