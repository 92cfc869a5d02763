use async_trait::async_trait;
use dashmap::DashMap;
use uuid::Uuid;

use crate::contract::model::User;
use crate::domain::error::RepoError;
use crate::domain::repo::UsersRepository;

/// `UsersRepository` over a sharded concurrent map. Each call is atomic for
/// its key; concurrent writers to the same id resolve as last write wins.
#[derive(Debug, Default)]
pub struct InMemoryUsersRepository {
    users: DashMap<Uuid, User>,
}

impl InMemoryUsersRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl UsersRepository for InMemoryUsersRepository {
    async fn save(&self, user: User) -> Result<(), RepoError> {
        self.users.insert(user.id, user);
        Ok(())
    }

    async fn delete(&self, id: Uuid) -> Result<(), RepoError> {
        self.users
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| RepoError::not_found(id))
    }

    async fn get_by_id(&self, id: Uuid) -> Result<User, RepoError> {
        self.users
            .get(&id)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| RepoError::not_found(id))
    }

    async fn list_all(&self) -> Result<Vec<User>, RepoError> {
        Ok(self
            .users
            .iter()
            .map(|entry| entry.value().clone())
            .collect())
    }
}
