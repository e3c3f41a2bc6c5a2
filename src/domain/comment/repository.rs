use async_trait::async_trait;

use super::model::{Comment, FeedComment, NewComment};
use crate::domain::DomainResult;

#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Newest comments first, each with its author and restaurant.
    async fn find_recent(&self, limit: u64) -> DomainResult<Vec<FeedComment>>;

    async fn create(&self, user_id: i32, comment: NewComment) -> DomainResult<Comment>;
}
