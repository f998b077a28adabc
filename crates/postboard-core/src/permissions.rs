//! Access rules for posts.
//!
//! Reads are open to everyone. Writes need an authenticated principal, and
//! writes to an existing post need that principal to be its owner. These are
//! pure predicates; callers resolve the post first so a missing post is
//! reported as not found before any permission is consulted.

use crate::domain::{Post, Principal};
use crate::error::DomainError;

/// The kind of access a request asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Read,
    Write,
}

/// A permission policy checked by an endpoint before it touches storage.
pub trait AccessPolicy {
    /// Request-level check, made before any post is loaded.
    fn has_permission(&self, _principal: &Principal, _operation: Operation) -> bool {
        true
    }

    /// Object-level check against a post that exists.
    fn has_object_permission(
        &self,
        _principal: &Principal,
        _post: &Post,
        _operation: Operation,
    ) -> bool {
        true
    }
}

/// Anyone may read; only authenticated principals may write.
#[derive(Debug, Clone, Copy, Default)]
pub struct AuthenticatedOrReadOnly;

impl AccessPolicy for AuthenticatedOrReadOnly {
    fn has_permission(&self, principal: &Principal, operation: Operation) -> bool {
        operation == Operation::Read || principal.is_authenticated()
    }
}

/// Anyone may read; only the owner may write.
#[derive(Debug, Clone, Copy, Default)]
pub struct OwnerOrReadOnly;

impl AccessPolicy for OwnerOrReadOnly {
    fn has_object_permission(&self, principal: &Principal, post: &Post, operation: Operation) -> bool {
        operation == Operation::Read || can_write(principal, post)
    }
}

/// Whether `principal` is the owner of `post`. Anonymous principals own nothing.
pub fn is_owner(principal: &Principal, post: &Post) -> bool {
    principal
        .actor()
        .is_some_and(|actor| actor.user_id == post.owner.id)
}

/// Whether `principal` may update or delete `post`.
pub fn can_write(principal: &Principal, post: &Post) -> bool {
    is_owner(principal, post)
}

/// Run a request-level check, turning a deny into [`DomainError::PermissionDenied`].
pub fn check<P: AccessPolicy>(
    policy: &P,
    principal: &Principal,
    operation: Operation,
) -> Result<(), DomainError> {
    if policy.has_permission(principal, operation) {
        Ok(())
    } else {
        Err(DomainError::PermissionDenied)
    }
}

/// Run both checks of `policy` against an already resolved post.
pub fn check_object<P: AccessPolicy>(
    policy: &P,
    principal: &Principal,
    post: &Post,
    operation: Operation,
) -> Result<(), DomainError> {
    check(policy, principal, operation)?;
    if policy.has_object_permission(principal, post, operation) {
        Ok(())
    } else {
        Err(DomainError::PermissionDenied)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;

    use super::*;
    use crate::domain::{Actor, Owner};

    fn actor(name: &str) -> Actor {
        Actor {
            user_id: Uuid::new_v4(),
            username: name.to_string(),
        }
    }

    fn post_owned_by(owner: &Actor) -> Post {
        let now = Utc::now();
        Post {
            id: 1,
            owner: Owner {
                id: owner.user_id,
                username: owner.username.clone(),
            },
            title: "a title".to_string(),
            content: String::new(),
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_anyone_can_read() {
        let adam = actor("adam");
        let post = post_owned_by(&adam);

        for principal in [
            Principal::Anonymous,
            Principal::Authenticated(adam.clone()),
            Principal::Authenticated(actor("brian")),
        ] {
            assert!(check(&AuthenticatedOrReadOnly, &principal, Operation::Read).is_ok());
            assert!(check_object(&OwnerOrReadOnly, &principal, &post, Operation::Read).is_ok());
        }
    }

    #[test]
    fn test_anonymous_cannot_create() {
        let result = check(&AuthenticatedOrReadOnly, &Principal::Anonymous, Operation::Write);
        assert!(matches!(result, Err(DomainError::PermissionDenied)));
    }

    #[test]
    fn test_authenticated_can_create() {
        let principal = Principal::Authenticated(actor("adam"));
        assert!(check(&AuthenticatedOrReadOnly, &principal, Operation::Write).is_ok());
    }

    #[test]
    fn test_owner_can_write() {
        let adam = actor("adam");
        let post = post_owned_by(&adam);
        let principal = Principal::Authenticated(adam);

        assert!(can_write(&principal, &post));
        assert!(check_object(&OwnerOrReadOnly, &principal, &post, Operation::Write).is_ok());
    }

    #[test]
    fn test_non_owner_cannot_write() {
        let post = post_owned_by(&actor("adam"));
        let brian = Principal::Authenticated(actor("brian"));

        assert!(!can_write(&brian, &post));
        assert!(matches!(
            check_object(&OwnerOrReadOnly, &brian, &post, Operation::Write),
            Err(DomainError::PermissionDenied)
        ));
    }

    #[test]
    fn test_anonymous_never_owns() {
        let post = post_owned_by(&actor("adam"));
        assert!(!is_owner(&Principal::Anonymous, &post));
        assert!(!can_write(&Principal::Anonymous, &post));
    }

    #[test]
    fn test_same_username_different_id_is_not_owner() {
        let adam = actor("adam");
        let post = post_owned_by(&adam);
        let impostor = Principal::Authenticated(Actor {
            user_id: Uuid::new_v4(),
            username: adam.username.clone(),
        });

        assert!(!is_owner(&impostor, &post));
    }
}
