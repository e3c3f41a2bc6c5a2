//! Comment form DTO

use serde::Deserialize;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::domain::{trimmed_comment_text, DomainError, NewComment};

/// `application/x-www-form-urlencoded` body of `POST /comments`
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CommentForm {
    /// 1 to `MAX_COMMENT_LENGTH` characters once surrounding whitespace is trimmed
    #[validate(custom(function = "validate_comment_text"))]
    pub text: String,
    #[validate(range(min = 1))]
    pub restaurant_id: i32,
}

impl From<CommentForm> for NewComment {
    fn from(form: CommentForm) -> Self {
        Self {
            restaurant_id: form.restaurant_id,
            text: form.text,
        }
    }
}

fn validate_comment_text(text: &str) -> Result<(), ValidationError> {
    trimmed_comment_text(text).map(|_| ()).map_err(|e| {
        let mut error = ValidationError::new("comment_text");
        error.message = Some(match e {
            DomainError::Validation(message) => message.into(),
            other => other.to_string().into(),
        });
        error
    })
}
