use crate::contract::model::User;
use crate::domain::error::RepoError;
use async_trait::async_trait;
use uuid::Uuid;

/// Port for the domain layer: persistence operations the domain needs.
/// Object-safe and async-friendly via `async_trait`.
#[async_trait]
pub trait UsersRepository: Send + Sync {
    /// Insert or replace the user stored under `user.id`.
    async fn save(&self, user: User) -> Result<(), RepoError>;
    /// Remove by id; `NotFound` if nothing was stored.
    async fn delete(&self, id: Uuid) -> Result<(), RepoError>;
    /// Copy of the stored user; `NotFound` if absent.
    async fn get_by_id(&self, id: Uuid) -> Result<User, RepoError>;
    /// Every stored user, in no particular order.
    async fn list_all(&self) -> Result<Vec<User>, RepoError>;
}
