//! Data Transfer Objects - request/response types for the API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    pub username: String,
    pub password: String,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Response containing a user's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
}

/// Response containing authentication tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
}

/// Body of a create, replace or patch request for a post.
///
/// Fields are optional so missing values surface as field errors rather than
/// parse failures. Unknown fields, `owner` included, are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PostRequest {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

/// Wire representation of a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: i64,
    /// Username of the owner.
    pub owner: String,
    /// Whether the requesting user owns this post.
    pub is_owner: bool,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_post_request_ignores_owner_field() {
        let req: PostRequest =
            serde_json::from_str(r#"{"title": "a title", "owner": 42}"#).unwrap();
        assert_eq!(req.title.as_deref(), Some("a title"));
        assert_eq!(req.content, None);
    }

    #[test]
    fn test_post_request_accepts_empty_object() {
        let req: PostRequest = serde_json::from_str("{}").unwrap();
        assert!(req.title.is_none());
    }
}
