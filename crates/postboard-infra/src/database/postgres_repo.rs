//! PostgreSQL repository implementations.

use async_trait::async_trait;
use sea_orm::ActiveValue::{Set, Unchanged};
use sea_orm::{ActiveModelTrait, ColumnTrait, DbConn, EntityTrait, QueryFilter, QueryOrder};

use postboard_core::domain::{NewPost, Post, User};
use postboard_core::error::RepoError;
use postboard_core::ports::{PostRepository, UserRepository};

use super::entity::post::{self, Entity as PostEntity};
use super::entity::user::{self, Entity as UserEntity};
use super::postgres_base::{PostgresBaseRepository, map_db_err};

/// PostgreSQL user repository.
pub type PostgresUserRepository = PostgresBaseRepository<UserEntity>;

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(username, "Finding user by username");

        let result = UserEntity::find()
            .filter(user::Column::Username.eq(username))
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        Ok(result.map(Into::into))
    }
}

/// PostgreSQL post repository. Every read joins the owner so posts come back
/// with the owner's username.
pub struct PostgresPostRepository {
    db: DbConn,
}

impl PostgresPostRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }
}

fn hydrate((post, owner): (post::Model, Option<user::Model>)) -> Result<Post, RepoError> {
    let owner = owner.ok_or_else(|| {
        RepoError::Query(format!("post {} references a missing owner", post.id))
    })?;
    Ok(post.into_post(owner.into()))
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn list_all(&self) -> Result<Vec<Post>, RepoError> {
        let rows = PostEntity::find()
            .find_also_related(UserEntity)
            .order_by_asc(post::Column::Id)
            .all(&self.db)
            .await
            .map_err(map_db_err)?;

        rows.into_iter().map(hydrate).collect()
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Post>, RepoError> {
        let row = PostEntity::find_by_id(id)
            .find_also_related(UserEntity)
            .one(&self.db)
            .await
            .map_err(map_db_err)?;

        row.map(hydrate).transpose()
    }

    async fn insert(&self, new_post: NewPost) -> Result<Post, RepoError> {
        let created_at = new_post.created_at;
        let model = post::ActiveModel {
            owner_id: Set(new_post.owner.id),
            title: Set(new_post.title),
            content: Set(new_post.content),
            created_at: Set(created_at.into()),
            updated_at: Set(created_at.into()),
            ..Default::default()
        }
        .insert(&self.db)
        .await
        .map_err(map_db_err)?;

        Ok(model.into_post(new_post.owner))
    }

    async fn update(&self, post: Post) -> Result<Post, RepoError> {
        let model = post::ActiveModel {
            id: Unchanged(post.id),
            title: Set(post.title),
            content: Set(post.content),
            updated_at: Set(post.updated_at.into()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .map_err(map_db_err)?;

        Ok(model.into_post(post.owner))
    }

    async fn delete(&self, id: i64) -> Result<(), RepoError> {
        let result = PostEntity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(map_db_err)?;

        if result.rows_affected == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }
}
