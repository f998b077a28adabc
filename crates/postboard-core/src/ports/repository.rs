use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{NewPost, Post, User};
use crate::error::RepoError;

/// Generic repository trait for entities whose ids are chosen by the caller.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;
}

/// User repository with domain-specific methods.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;
}

/// Post repository. Ids are assigned by storage, sequentially, and never reused.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// All posts, ascending by id.
    async fn list_all(&self) -> Result<Vec<Post>, RepoError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError>;

    /// Store a new post and return it with its assigned id.
    async fn insert(&self, post: NewPost) -> Result<Post, RepoError>;

    /// Persist the mutable fields of an existing post. The owner is never written.
    ///
    /// Returns [`RepoError::NotFound`] if the post no longer exists.
    async fn update(&self, post: Post) -> Result<Post, RepoError>;

    /// Returns [`RepoError::NotFound`] if nothing was deleted.
    async fn delete(&self, id: i64) -> Result<(), RepoError>;
}
