use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{DomainError, FieldErrors};

/// Maximum title length, in characters.
pub const TITLE_MAX_LENGTH: usize = 255;

/// The user a post belongs to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub id: Uuid,
    pub username: String,
}

/// Post entity - a titled entry owned by the user who created it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub owner: Owner,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Post {
    /// Apply validated changes and refresh `updated_at`.
    ///
    /// The owner is not part of [`PostChanges`], so it can never be reassigned here.
    pub fn apply(&mut self, changes: PostChanges) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(content) = changes.content {
            self.content = content;
        }
        self.touch();
    }

    /// Bump `updated_at`, keeping it strictly increasing even when the clock
    /// has not advanced past the previous value (storage keeps microseconds).
    pub fn touch(&mut self) {
        let floor = self.updated_at + TimeDelta::microseconds(1);
        self.updated_at = Utc::now().max(floor);
    }
}

/// A post that has not been stored yet; the repository assigns its id.
#[derive(Debug, Clone)]
pub struct NewPost {
    pub owner: Owner,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl NewPost {
    /// Validate the submitted fields for a post owned by `owner`.
    pub fn new(
        owner: Owner,
        title: Option<String>,
        content: Option<String>,
    ) -> Result<Self, DomainError> {
        let changes = PostChanges::full(title, content)?;
        Ok(Self {
            owner,
            // `full` guarantees a title
            title: changes.title.unwrap_or_default(),
            content: changes.content.unwrap_or_default(),
            created_at: Utc::now(),
        })
    }
}

/// Validated changes to the mutable fields of a post.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostChanges {
    pub title: Option<String>,
    pub content: Option<String>,
}

impl PostChanges {
    /// Changes for a full replacement: `title` is required.
    pub fn full(title: Option<String>, content: Option<String>) -> Result<Self, DomainError> {
        let mut errors = FieldErrors::new();
        if title.is_none() {
            errors.add("title", "This field is required.");
        }
        Self::validate(title, content, errors)
    }

    /// Changes for a partial update: every field is optional.
    pub fn partial(title: Option<String>, content: Option<String>) -> Result<Self, DomainError> {
        Self::validate(title, content, FieldErrors::new())
    }

    fn validate(
        title: Option<String>,
        content: Option<String>,
        mut errors: FieldErrors,
    ) -> Result<Self, DomainError> {
        let title = title.map(|t| t.trim().to_string());
        if let Some(title) = &title {
            if title.is_empty() {
                errors.add("title", "This field may not be blank.");
            } else if title.chars().count() > TITLE_MAX_LENGTH {
                errors.add(
                    "title",
                    format!("Ensure this field has no more than {TITLE_MAX_LENGTH} characters."),
                );
            }
        }
        errors.into_result()?;

        Ok(Self {
            title,
            content: content.map(|c| c.trim().to_string()),
        })
    }
}
