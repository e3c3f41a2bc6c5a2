pub mod category;
pub mod comment;
pub mod repositories;
pub mod restaurant;
pub mod user;

// Re-export commonly used types
pub use category::{Category, CategoryRepository};
pub use comment::{
    trimmed_comment_text, Comment, CommentRepository, CommentWithAuthor, FeedComment, NewComment,
};
pub use repositories::{DomainResult, RepositoryProvider};
pub use restaurant::{
    top_by_favorites, FavoriteTally, RankedRestaurant, Restaurant, RestaurantDetail,
    RestaurantFilter, RestaurantProfile, RestaurantRepository, RestaurantSummary,
    RestaurantWithCategory,
};
pub use user::{CommentAuthor, CurrentUser, UserProfile, UserRelations, UserRepository};

pub use crate::shared::errors::DomainError;
