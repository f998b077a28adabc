//! Domain entities - the core business objects.

mod post;
mod principal;
mod user;

pub use post::{NewPost, Owner, Post, PostChanges, TITLE_MAX_LENGTH};
pub use principal::{Actor, Principal};
pub use user::{USERNAME_MAX_LENGTH, User};
