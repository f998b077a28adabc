use uuid::Uuid;

use super::post::Owner;

/// An authenticated user acting on a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub user_id: Uuid,
    pub username: String,
}

impl Actor {
    /// The owner record a post created by this actor receives.
    pub fn as_owner(&self) -> Owner {
        Owner {
            id: self.user_id,
            username: self.username.clone(),
        }
    }
}

/// Whoever is making the current request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Principal {
    #[default]
    Anonymous,
    Authenticated(Actor),
}

impl Principal {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Principal::Authenticated(_))
    }

    pub fn actor(&self) -> Option<&Actor> {
        match self {
            Principal::Authenticated(actor) => Some(actor),
            Principal::Anonymous => None,
        }
    }
}

impl From<Option<Actor>> for Principal {
    fn from(actor: Option<Actor>) -> Self {
        actor.map_or(Principal::Anonymous, Principal::Authenticated)
    }
}
