//! Restaurant domain entity and its read projections

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::category::Category;
use crate::domain::comment::CommentWithAuthor;
use crate::domain::user::UserRelations;

/// Restaurant as stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Restaurant {
    pub id: i32,
    pub name: String,
    pub tel: String,
    pub address: String,
    pub opening_hours: String,
    pub description: String,
    pub image: Option<String>,
    pub category_id: Option<i32>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Listing filter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RestaurantFilter {
    /// Only restaurants in this category; `None` lists every restaurant
    pub category_id: Option<i32>,
}

/// Restaurant joined with its category
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantWithCategory {
    #[serde(flatten)]
    pub restaurant: Restaurant,
    pub category: Option<Category>,
}

/// Restaurant with category and comments (newest first)
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantProfile {
    #[serde(flatten)]
    pub restaurant: Restaurant,
    pub category: Option<Category>,
    pub comments: Vec<CommentWithAuthor>,
}

/// Detail page data: the profile plus the viewer's membership flags
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantDetail {
    pub restaurant: RestaurantProfile,
    pub is_favorited: bool,
    pub is_liked: bool,
}

impl RestaurantDetail {
    pub fn new(profile: RestaurantProfile, relations: &UserRelations) -> Self {
        let (is_favorited, is_liked) = relations.membership(profile.restaurant.id);
        Self {
            restaurant: profile,
            is_favorited,
            is_liked,
        }
    }
}

/// Restaurant with the number of users who favorited it
#[derive(Debug, Clone)]
pub struct FavoriteTally {
    pub restaurant: Restaurant,
    pub category: Option<Category>,
    pub favorite_count: u64,
}

/// List-view projection of a restaurant for one viewer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantSummary {
    pub id: i32,
    pub name: String,
    /// Description cut to the configured excerpt length
    pub description: String,
    pub image: Option<String>,
    pub category_id: Option<i32>,
    pub category_name: Option<String>,
    pub is_favorited: bool,
    pub is_liked: bool,
}

impl RestaurantSummary {
    pub fn new(
        restaurant: &Restaurant,
        category: Option<&Category>,
        relations: &UserRelations,
        excerpt_len: usize,
    ) -> Self {
        let (is_favorited, is_liked) = relations.membership(restaurant.id);
        Self {
            id: restaurant.id,
            name: restaurant.name.clone(),
            description: excerpt(&restaurant.description, excerpt_len),
            image: restaurant.image.clone(),
            category_id: restaurant.category_id,
            category_name: category.map(|c| c.name.clone()),
            is_favorited,
            is_liked,
        }
    }
}

/// Summary plus favorite count, as shown by the top-restaurants page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RankedRestaurant {
    #[serde(flatten)]
    pub summary: RestaurantSummary,
    pub favorite_count: u64,
}

/// First `max_chars` characters of `text`.
pub fn excerpt(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => text[..cut].to_string(),
        None => text.to_string(),
    }
}
