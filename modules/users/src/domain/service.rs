use std::sync::Arc;

use crate::contract::model::{User, UserPatch, UserProperties};
use crate::domain::error::DomainError;
use crate::domain::repo::UsersRepository;
use tracing::{debug, info, instrument};
use uuid::Uuid;

/// Domain service with business rules for user management.
/// Depends only on the repository port, not on infra types.
#[derive(Clone)]
pub struct Service {
    repo: Arc<dyn UsersRepository>,
}

impl Service {
    /// Create a service over an injected repository.
    pub fn new(repo: Arc<dyn UsersRepository>) -> Self {
        Self { repo }
    }

    /// Persist `user` as given. The caller assigns the id.
    #[instrument(
        name = "users.service.create_user",
        skip(self),
        fields(user_id = %user.id)
    )]
    pub async fn create_user(&self, user: User) -> Result<User, DomainError> {
        info!("Creating user");

        ensure_valid_id(user.id)?;

        self.repo
            .save(user.clone())
            .await
            .map_err(|e| DomainError::repository("could not create user", e))?;

        info!("Successfully created user");
        Ok(user)
    }

    #[instrument(name = "users.service.get_user", skip(self), fields(user_id = %id))]
    pub async fn get_user(&self, id: Uuid) -> Result<User, DomainError> {
        debug!("Fetching user by id");

        ensure_valid_id(id)?;

        self.repo
            .get_by_id(id)
            .await
            .map_err(|e| DomainError::repository("could not fetch user by id", e))
    }

    #[instrument(name = "users.service.update_user", skip(self), fields(user_id = %id))]
    pub async fn update_user(&self, id: Uuid, patch: UserPatch) -> Result<User, DomainError> {
        info!("Updating user");

        ensure_valid_id(id)?;

        let mut current = self
            .repo
            .get_by_id(id)
            .await
            .map_err(|e| DomainError::repository("could not fetch user by id", e))?;

        if let Some(name) = patch.name {
            current.name = name;
        }
        if let Some(role) = patch.role {
            current.role = role;
        }

        self.repo
            .save(current.clone())
            .await
            .map_err(|e| DomainError::repository("could not update user", e))?;

        info!("Successfully updated user");
        Ok(current)
    }

    #[instrument(name = "users.service.delete_user", skip(self), fields(user_id = %id))]
    pub async fn delete_user(&self, id: Uuid) -> Result<(), DomainError> {
        info!("Deleting user");

        ensure_valid_id(id)?;

        self.repo
            .delete(id)
            .await
            .map_err(|e| DomainError::repository("could not delete user by id", e))?;

        info!("Successfully deleted user");
        Ok(())
    }

    /// List users, keeping only those that match every present filter field.
    #[instrument(name = "users.service.list_by_property", skip(self))]
    pub async fn list_by_property(
        &self,
        filter: Option<&UserProperties>,
    ) -> Result<Vec<User>, DomainError> {
        debug!("Listing users by property");

        let mut users = self
            .repo
            .list_all()
            .await
            .map_err(|e| DomainError::repository("could not list stored users", e))?;

        if let Some(filter) = filter.filter(|f| !f.is_empty()) {
            users.retain(|user| filter.matches(user));
        }

        debug!("Found {} matching users", users.len());
        Ok(users)
    }
}

fn ensure_valid_id(id: Uuid) -> Result<(), DomainError> {
    if id.is_nil() {
        return Err(DomainError::invalid_id());
    }
    Ok(())
}
