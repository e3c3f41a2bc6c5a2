//! Comment aggregate

pub mod model;
pub mod repository;

pub use model::{
    trimmed_comment_text, Comment, CommentWithAuthor, FeedComment, NewComment, MAX_COMMENT_LENGTH,
};
pub use repository::CommentRepository;
