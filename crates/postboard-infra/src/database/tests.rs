use chrono::Utc;
use sea_orm::{DatabaseBackend, MockDatabase, MockExecResult};
use uuid::Uuid;

use postboard_core::domain::{NewPost, Owner, Post, User};
use postboard_core::error::RepoError;
use postboard_core::ports::{PostRepository, UserRepository};

use super::entity::{post, user};
use super::postgres_repo::{PostgresPostRepository, PostgresUserRepository};

fn user_model(id: Uuid, username: &str) -> user::Model {
    let now = Utc::now();
    user::Model {
        id,
        username: username.to_owned(),
        password_hash: "hash".to_owned(),
        created_at: now.into(),
        updated_at: now.into(),
    }
}

fn post_model(id: i64, owner_id: Uuid, title: &str) -> post::Model {
    let now = Utc::now();
    post::Model {
        id,
        owner_id,
        title: title.to_owned(),
        content: String::new(),
        created_at: now.into(),
        updated_at: now.into(),
    }
}

#[tokio::test]
async fn test_find_post_by_id_includes_owner() {
    let owner_id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![(
            post_model(1, owner_id, "a title"),
            user_model(owner_id, "adam"),
        )]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    let post = repo.find_by_id(1).await.unwrap().unwrap();

    assert_eq!(post.id, 1);
    assert_eq!(post.title, "a title");
    assert_eq!(post.owner.id, owner_id);
    assert_eq!(post.owner.username, "adam");
}

#[tokio::test]
async fn test_find_missing_post_returns_none() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<(post::Model, user::Model)>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    assert!(repo.find_by_id(7).await.unwrap().is_none());
}

#[tokio::test]
async fn test_insert_post_returns_assigned_id() {
    let owner = Owner {
        id: Uuid::new_v4(),
        username: "adam".to_owned(),
    };

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post_model(1, owner.id, "a title")]])
        .into_connection();

    let repo = PostgresPostRepository::new(db);
    let new_post = NewPost::new(owner.clone(), Some("a title".to_owned()), None).unwrap();

    let post = repo.insert(new_post).await.unwrap();

    assert_eq!(post.id, 1);
    assert_eq!(post.owner, owner);
}

#[tokio::test]
async fn test_update_vanished_post_is_not_found() {
    let now = Utc::now();
    let post = Post {
        id: 3,
        owner: Owner {
            id: Uuid::new_v4(),
            username: "adam".to_owned(),
        },
        title: "a new title".to_owned(),
        content: String::new(),
        created_at: now,
        updated_at: now,
    };

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<post::Model>::new()])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    assert!(matches!(repo.update(post).await, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_delete_missing_post_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let repo = PostgresPostRepository::new(db);

    assert!(matches!(repo.delete(9).await, Err(RepoError::NotFound)));
}

#[tokio::test]
async fn test_find_user_by_username() {
    let user_id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![user_model(user_id, "brian")]])
        .into_connection();

    let repo = PostgresUserRepository::new(db);

    let user: User = repo.find_by_username("brian").await.unwrap().unwrap();
    assert_eq!(user.id, user_id);
}
