//! Conversion between stored posts and their wire representation.

use postboard_core::domain::{NewPost, Post, PostChanges, Principal};
use postboard_core::error::DomainError;
use postboard_core::permissions;
use postboard_shared::dto::{PostRequest, PostResponse};

/// Render `post` for `principal`; `is_owner` is computed per request.
pub fn post_response(post: &Post, principal: &Principal) -> PostResponse {
    PostResponse {
        id: post.id,
        owner: post.owner.username.clone(),
        is_owner: permissions::is_owner(principal, post),
        title: post.title.clone(),
        content: post.content.clone(),
        created_at: post.created_at,
        updated_at: post.updated_at,
    }
}

/// Validate a create request. The owner always comes from the principal.
pub fn new_post(req: PostRequest, principal: &Principal) -> Result<NewPost, DomainError> {
    let actor = principal.actor().ok_or(DomainError::PermissionDenied)?;
    NewPost::new(actor.as_owner(), req.title, req.content)
}

/// Validate an update request, full (`PUT`) or partial (`PATCH`).
pub fn post_changes(req: PostRequest, partial: bool) -> Result<PostChanges, DomainError> {
    if partial {
        PostChanges::partial(req.title, req.content)
    } else {
        PostChanges::full(req.title, req.content)
    }
}
