use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use postboard_core::domain::{NewPost, Post};
use postboard_core::error::RepoError;
use postboard_core::ports::PostRepository;

#[derive(Default)]
struct PostTable {
    rows: BTreeMap<i64, Post>,
    last_id: i64,
}

/// In-memory post store. Ids start at 1 and are never reused.
#[derive(Default)]
pub struct InMemoryPostRepository {
    table: RwLock<PostTable>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list_all(&self) -> Result<Vec<Post>, RepoError> {
        let table = self.table.read().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        let table = self.table.read().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn insert(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let mut table = self.table.write().await;
        table.last_id += 1;

        let post = Post {
            id: table.last_id,
            owner: new_post.owner,
            title: new_post.title,
            content: new_post.content,
            created_at: new_post.created_at,
            updated_at: new_post.created_at,
        };
        table.rows.insert(post.id, post.clone());

        Ok(post)
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let mut table = self.table.write().await;
        let stored = table.rows.get_mut(&post.id).ok_or(RepoError::NotFound)?;

        // owner and created_at stay as stored
        stored.title = post.title;
        stored.content = post.content;
        stored.updated_at = post.updated_at;

        Ok(stored.clone())
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let mut table = self.table.write().await;
        table.rows.remove(&id).map(|_| ()).ok_or(RepoError::NotFound)
    }
}

#[cfg(test)]
mod tests {
    use postboard_core::domain::{Owner, PostChanges};
    use uuid::Uuid;

    use super::*;

    fn owner(name: &str) -> Owner {
        Owner {
            id: Uuid::new_v4(),
            username: name.to_string(),
        }
    }

    async fn insert(repo: &InMemoryPostRepository, owner: &Owner, title: &str) -> Post {
        let new_post = NewPost::new(owner.clone(), Some(title.to_string()), None).unwrap();
        repo.insert(new_post).await.unwrap()
    }

    #[tokio::test]
    async fn test_ids_are_sequential_and_not_reused() {
        let repo = InMemoryPostRepository::new();
        let adam = owner("adam");

        assert_eq!(insert(&repo, &adam, "one").await.id, 1);
        assert_eq!(insert(&repo, &adam, "two").await.id, 2);

        repo.delete(2).await.unwrap();
        assert_eq!(insert(&repo, &adam, "three").await.id, 3);
    }

    #[tokio::test]
    async fn test_list_is_ascending_by_id() {
        let repo = InMemoryPostRepository::new();
        let adam = owner("adam");
        for title in ["one", "two", "three"] {
            insert(&repo, &adam, title).await;
        }

        let ids: Vec<i64> = repo.list_all().await.unwrap().iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_update_never_changes_owner() {
        let repo = InMemoryPostRepository::new();
        let adam = owner("adam");
        let mut post = insert(&repo, &adam, "a title").await;

        post.owner = owner("brian");
        post.apply(PostChanges::full(Some("a new title".to_string()), None).unwrap());
        let updated = repo.update(post).await.unwrap();

        assert_eq!(updated.title, "a new title");
        assert_eq!(updated.owner, adam);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_post() {
        let repo = InMemoryPostRepository::new();
        let post = insert(&repo, &owner("adam"), "a title").await;
        repo.delete(post.id).await.unwrap();

        assert!(repo.find_by_id(post.id).await.unwrap().is_none());
        assert!(matches!(repo.update(post).await, Err(RepoError::NotFound)));
        assert!(matches!(repo.delete(1).await, Err(RepoError::NotFound)));
    }
}
