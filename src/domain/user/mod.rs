//! User aggregate
//!
//! Contains the user profile, the per-request relation sets and the
//! repository interface.

pub mod model;
pub mod repository;

pub use model::{CommentAuthor, CurrentUser, UserProfile, UserRelations};
pub use repository::UserRepository;
