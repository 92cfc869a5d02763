use async_trait::async_trait;
use uuid::Uuid;

use crate::contract::{
    error::UsersError,
    model::{NewUser, User, UserPatch, UserProperties},
};

/// Public API trait for the users module that other modules can use
#[async_trait]
pub trait UsersApi: Send + Sync {
    /// Get a user by ID
    async fn get_user(&self, id: Uuid) -> Result<User, UsersError>;

    /// List users matching the filter; `None` lists everyone
    async fn list_users(&self, filter: Option<UserProperties>) -> Result<Vec<User>, UsersError>;

    /// Create a new user with a freshly generated ID
    async fn create_user(&self, new_user: NewUser) -> Result<User, UsersError>;

    /// Update a user with partial data
    async fn update_user(&self, id: Uuid, patch: UserPatch) -> Result<User, UsersError>;

    /// Delete a user by ID
    async fn delete_user(&self, id: Uuid) -> Result<(), UsersError>;
}
