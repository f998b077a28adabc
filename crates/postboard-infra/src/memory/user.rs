use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use postboard_core::domain::User;
use postboard_core::error::RepoError;
use postboard_core::ports::{BaseRepository, UserRepository};

/// In-memory user store keyed by id, with unique usernames.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: RwLock<HashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl BaseRepository<User, Uuid> for InMemoryUserRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, RepoError> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn insert(&self, user: User) -> Result<User, RepoError> {
        let mut users = self.users.write().await;

        if users.contains_key(&user.id) || users.values().any(|u| u.username == user.username) {
            return Err(RepoError::Constraint(format!(
                "username '{}' already exists",
                user.username
            )));
        }

        users.insert(user.id, user.clone());
        Ok(user)
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_insert_and_find() {
        let repo = InMemoryUserRepository::new();
        let user = repo
            .insert(User::new("adam".to_string(), "hash".to_string()))
            .await
            .unwrap();

        let by_name = repo.find_by_username("adam").await.unwrap().unwrap();
        assert_eq!(by_name.id, user.id);
        assert!(repo.find_by_id(user.id).await.unwrap().is_some());
        assert!(repo.find_by_username("brian").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_duplicate_username_rejected() {
        let repo = InMemoryUserRepository::new();
        repo.insert(User::new("adam".to_string(), "hash".to_string()))
            .await
            .unwrap();

        let result = repo
            .insert(User::new("adam".to_string(), "other".to_string()))
            .await;
        assert!(matches!(result, Err(RepoError::Constraint(_))));
    }
}
