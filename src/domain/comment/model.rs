//! Comment domain entity and read projections

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::restaurant::Restaurant;
use crate::domain::user::CommentAuthor;
use crate::domain::{DomainError, DomainResult};

/// Longest accepted comment, in characters
pub const MAX_COMMENT_LENGTH: usize = 500;

/// A user's review comment on a restaurant
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i32,
    pub text: String,
    pub user_id: i32,
    pub restaurant_id: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for posting a comment
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewComment {
    pub restaurant_id: i32,
    pub text: String,
}

/// Trimmed comment text, checked to be non-empty and within
/// `MAX_COMMENT_LENGTH` characters.
pub fn trimmed_comment_text(text: &str) -> DomainResult<&str> {
    let text = text.trim();
    if text.is_empty() {
        return Err(DomainError::Validation("Comment text must not be empty".into()));
    }
    if text.chars().count() > MAX_COMMENT_LENGTH {
        return Err(DomainError::Validation(format!(
            "Comment text must be at most {} characters",
            MAX_COMMENT_LENGTH
        )));
    }
    Ok(text)
}

impl NewComment {
    pub fn normalized(self) -> DomainResult<Self> {
        let text = trimmed_comment_text(&self.text)?;
        Ok(Self {
            restaurant_id: self.restaurant_id,
            text: text.to_string(),
        })
    }
}

/// Comment together with the user who wrote it
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentWithAuthor {
    #[serde(flatten)]
    pub comment: Comment,
    pub user: Option<CommentAuthor>,
}

/// Feed entry: comment with its author and the restaurant it is about
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedComment {
    #[serde(flatten)]
    pub comment: Comment,
    pub user: Option<CommentAuthor>,
    pub restaurant: Option<Restaurant>,
}
