//! # Postboard Core
//!
//! The domain layer of Postboard: posts, their owners, and the rules deciding
//! who may change them. No infrastructure dependencies live here.

pub mod domain;
pub mod error;
pub mod permissions;
pub mod ports;

pub use error::{DomainError, FieldErrors, RepoError};
