//! User domain entity and per-request relation data

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// A registered user as loaded for the current request.
///
/// Never serialized; pages show a `CommentAuthor` instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserProfile {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

/// Name shown next to a comment
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct CommentAuthor {
    pub id: i32,
    pub name: String,
}

impl From<UserProfile> for CommentAuthor {
    fn from(user: UserProfile) -> Self {
        Self {
            id: user.id,
            name: user.name,
        }
    }
}

/// Restaurants the requesting user has favorited or liked.
///
/// Loaded fresh for every request; the default value (both sets empty)
/// stands in for an anonymous visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserRelations {
    pub favorited: HashSet<i32>,
    pub liked: HashSet<i32>,
}

impl UserRelations {
    pub fn new(
        favorited: impl IntoIterator<Item = i32>,
        liked: impl IntoIterator<Item = i32>,
    ) -> Self {
        Self {
            favorited: favorited.into_iter().collect(),
            liked: liked.into_iter().collect(),
        }
    }

    pub fn is_favorited(&self, restaurant_id: i32) -> bool {
        self.favorited.contains(&restaurant_id)
    }

    pub fn is_liked(&self, restaurant_id: i32) -> bool {
        self.liked.contains(&restaurant_id)
    }

    /// `(is_favorited, is_liked)` for one restaurant
    pub fn membership(&self, restaurant_id: i32) -> (bool, bool) {
        (self.is_favorited(restaurant_id), self.is_liked(restaurant_id))
    }
}

/// The authenticated user behind a request, with their relation sets
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub profile: UserProfile,
    pub relations: UserRelations,
}

impl CurrentUser {
    pub fn id(&self) -> i32 {
        self.profile.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn membership_checks_both_sets() {
        let relations = UserRelations::new([1, 2], [2, 3]);
        assert_eq!(relations.membership(1), (true, false));
        assert_eq!(relations.membership(2), (true, true));
        assert_eq!(relations.membership(3), (false, true));
        assert_eq!(relations.membership(4), (false, false));
    }

    #[test]
    fn comment_author_carries_no_email() {
        let author = CommentAuthor::from(UserProfile {
            id: 4,
            name: "Ann".into(),
            email: "ann@example.com".into(),
            created_at: Utc::now(),
        });
        let json = serde_json::to_value(&author).unwrap();
        assert_eq!(json, serde_json::json!({"id": 4, "name": "Ann"}));
    }

    #[test]
    fn anonymous_relations_are_empty() {
        let relations = UserRelations::default();
        assert!(!relations.is_favorited(1));
        assert!(!relations.is_liked(1));
    }
}
