use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DomainError, FieldErrors};

use super::post::Owner;

pub const USERNAME_MAX_LENGTH: usize = 150;
const PASSWORD_MIN_LENGTH: usize = 8;

/// User entity - an account that can own posts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with generated ID and timestamps.
    pub fn new(username: String, password_hash: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            username,
            password_hash,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check registration input before the password is hashed.
    ///
    /// Usernames are 1-150 characters of letters, digits and `@.+-_`.
    pub fn validate_registration(username: &str, password: &str) -> Result<(), DomainError> {
        let mut errors = FieldErrors::new();

        if username.is_empty() {
            errors.add("username", "This field may not be blank.");
        } else if username.chars().count() > USERNAME_MAX_LENGTH {
            errors.add(
                "username",
                format!("Ensure this field has no more than {USERNAME_MAX_LENGTH} characters."),
            );
        } else if !username
            .chars()
            .all(|c| c.is_alphanumeric() || matches!(c, '@' | '.' | '+' | '-' | '_'))
        {
            errors.add(
                "username",
                "Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.",
            );
        }

        if password.chars().count() < PASSWORD_MIN_LENGTH {
            errors.add(
                "password",
                format!("Password must be at least {PASSWORD_MIN_LENGTH} characters."),
            );
        }

        errors.into_result()
    }

    pub fn as_owner(&self) -> Owner {
        Owner {
            id: self.id,
            username: self.username.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_registration() {
        assert!(User::validate_registration("adam.the_3rd", "passkey123").is_ok());
    }

    #[test]
    fn test_registration_reports_each_field() {
        let Err(DomainError::Validation(errors)) = User::validate_registration("bad name", "short")
        else {
            panic!("expected validation error");
        };
        assert!(errors.get("username").is_some());
        assert!(errors.get("password").is_some());
    }

    #[test]
    fn test_blank_username_rejected() {
        assert!(User::validate_registration("", "passkey123").is_err());
    }
}
