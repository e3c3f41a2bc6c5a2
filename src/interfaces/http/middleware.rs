//! Current-user middleware and extractors
//!
//! Identity is established upstream; this service trusts the numeric
//! `X-User-Id` header. Known users get a `CurrentUser` (profile plus
//! favorite/like sets) in the request extensions. Missing, malformed or
//! unknown ids leave the request anonymous.

use std::convert::Infallible;

use axum::{
    body::Body,
    extract::{FromRequestParts, State},
    http::{request::Parts, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::debug;

use super::common::ApiError;
use super::state::AppState;
use crate::domain::{CurrentUser, DomainError, DomainResult, RepositoryProvider, UserRelations};

/// Header carrying the authenticated user's id
pub const USER_ID_HEADER: &str = "x-user-id";

pub async fn current_user_middleware(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Response {
    let user_id = request
        .headers()
        .get(USER_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.trim().parse::<i32>().ok());

    if let Some(user_id) = user_id {
        match load_current_user(state.repos.as_ref(), user_id).await {
            Ok(Some(user)) => {
                request.extensions_mut().insert(user);
            }
            Ok(None) => debug!(user_id, "Unknown user id, continuing anonymously"),
            Err(e) => return ApiError::from(e).into_response(),
        }
    }

    next.run(request).await
}

async fn load_current_user(
    repos: &dyn RepositoryProvider,
    user_id: i32,
) -> DomainResult<Option<CurrentUser>> {
    let Some(profile) = repos.users().find_by_id(user_id).await? else {
        return Ok(None);
    };
    let relations = repos.users().find_relations(user_id).await?;
    Ok(Some(CurrentUser { profile, relations }))
}

/// Favorite/like sets of whoever is looking at the page; empty for
/// anonymous viewers.
#[derive(Debug, Clone, Default)]
pub struct Viewer {
    pub relations: UserRelations,
}

impl<S> FromRequestParts<S> for Viewer
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let relations = parts
            .extensions
            .get::<CurrentUser>()
            .map(|user| user.relations.clone())
            .unwrap_or_default();
        Ok(Viewer { relations })
    }
}

/// Extractor for endpoints that need a signed-in user (401 otherwise)
pub struct RequireUser(pub CurrentUser);

impl<S> FromRequestParts<S> for RequireUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<CurrentUser>()
            .cloned()
            .map(RequireUser)
            .ok_or_else(|| DomainError::Unauthorized("Sign in to continue".into()).into())
    }
}
