//! Comment posting handler

use axum::{
    extract::State,
    response::{IntoResponse, Redirect, Response},
};

use super::dto::CommentForm;
use crate::interfaces::http::common::{ApiError, ApiResponse, ValidatedForm};
use crate::interfaces::http::middleware::RequireUser;
use crate::interfaces::http::state::AppState;

/// Post a comment as the current user, then redirect to the restaurant page.
#[utoipa::path(
    post,
    path = "/comments",
    tag = "Comments",
    request_body(content = CommentForm, content_type = "application/x-www-form-urlencoded"),
    params(("X-User-Id" = i32, Header, description = "Authenticated user ID")),
    responses(
        (status = 303, description = "Redirect to /restaurants/{restaurantId}"),
        (status = 400, description = "Malformed form body", body = ApiResponse<String>),
        (status = 401, description = "No current user", body = ApiResponse<String>),
        (status = 404, description = "Unknown restaurant", body = ApiResponse<String>),
        (status = 422, description = "Invalid comment", body = ApiResponse<String>)
    )
)]
pub async fn post_comment(
    State(state): State<AppState>,
    RequireUser(user): RequireUser,
    ValidatedForm(form): ValidatedForm<CommentForm>,
) -> Result<Response, ApiError> {
    let comment = state.comments.post_comment(user.id(), form.into()).await?;
    Ok(Redirect::to(&format!("/restaurants/{}", comment.restaurant_id)).into_response())
}
