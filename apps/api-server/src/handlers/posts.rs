//! Post collection and item endpoints.
//!
//! Every item operation resolves the post first, so unknown ids are 404 for
//! everyone. Permission checks come next and body validation last.

use actix_web::{HttpResponse, web};

use postboard_core::domain::{Post, Principal};
use postboard_core::error::DomainError;
use postboard_core::permissions::{self, AuthenticatedOrReadOnly, Operation, OwnerOrReadOnly};
use postboard_shared::dto::{PostRequest, PostResponse};

use crate::middleware::auth::OptionalIdentity;
use crate::middleware::error::{AppError, AppResult};
use crate::serializers;
use crate::state::AppState;

/// A JSON body whose parse failure is reported only after permission checks.
type Body = Result<web::Json<PostRequest>, actix_web::Error>;

fn parse_body(body: Body) -> AppResult<PostRequest> {
    body.map(web::Json::into_inner)
        .map_err(|e| AppError::BadRequest(e.to_string()))
}

async fn find_post(state: &AppState, id: i64) -> AppResult<Post> {
    state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| {
            DomainError::NotFound {
                entity_type: "Post",
                id,
            }
            .into()
        })
}

/// GET /api/posts
pub async fn list_posts(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
) -> AppResult<HttpResponse> {
    let principal = identity.into_principal();

    let posts = state.posts.list_all().await?;
    let body: Vec<PostResponse> = posts
        .iter()
        .map(|post| serializers::post_response(post, &principal))
        .collect();

    Ok(HttpResponse::Ok().json(body))
}

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    identity: OptionalIdentity,
    body: Body,
) -> AppResult<HttpResponse> {
    let principal = identity.into_principal();
    permissions::check(&AuthenticatedOrReadOnly, &principal, Operation::Write)?;

    let new_post = serializers::new_post(parse_body(body)?, &principal)?;
    let post = state.posts.insert(new_post).await?;

    tracing::info!(post_id = post.id, owner = %post.owner.username, "Post created");

    Ok(HttpResponse::Created().json(serializers::post_response(&post, &principal)))
}

/// GET /api/posts/{id}
pub async fn retrieve_post(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    identity: OptionalIdentity,
) -> AppResult<HttpResponse> {
    let principal = identity.into_principal();
    let post = find_post(&state, path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(serializers::post_response(&post, &principal)))
}

/// PUT /api/posts/{id}
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    identity: OptionalIdentity,
    body: Body,
) -> AppResult<HttpResponse> {
    save_changes(&state, path.into_inner(), identity.into_principal(), body, false).await
}

/// PATCH /api/posts/{id}
pub async fn partial_update_post(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    identity: OptionalIdentity,
    body: Body,
) -> AppResult<HttpResponse> {
    save_changes(&state, path.into_inner(), identity.into_principal(), body, true).await
}

async fn save_changes(
    state: &AppState,
    id: i64,
    principal: Principal,
    body: Body,
    partial: bool,
) -> AppResult<HttpResponse> {
    let mut post = find_post(state, id).await?;
    authorize_write(&principal, &post)?;

    let changes = serializers::post_changes(parse_body(body)?, partial)?;
    post.apply(changes);
    let post = state.posts.update(post).await?;

    tracing::info!(post_id = post.id, partial, "Post updated");

    Ok(HttpResponse::Ok().json(serializers::post_response(&post, &principal)))
}

/// DELETE /api/posts/{id}
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<i64>,
    identity: OptionalIdentity,
) -> AppResult<HttpResponse> {
    let principal = identity.into_principal();
    let post = find_post(&state, path.into_inner()).await?;
    authorize_write(&principal, &post)?;

    state.posts.delete(post.id).await?;

    tracing::info!(post_id = post.id, "Post deleted");

    Ok(HttpResponse::NoContent().finish())
}

fn authorize_write(principal: &Principal, post: &Post) -> AppResult<()> {
    permissions::check_object(&OwnerOrReadOnly, principal, post, Operation::Write).map_err(|e| {
        tracing::warn!(
            post_id = post.id,
            user = principal.actor().map(|a| a.username.as_str()).unwrap_or("anonymous"),
            "Write to post denied"
        );
        e.into()
    })
}
