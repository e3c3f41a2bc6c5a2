use async_trait::async_trait;

use super::model::{UserProfile, UserRelations};
use crate::domain::DomainResult;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<UserProfile>>;

    /// Favorite and like sets of a user. Unknown users have empty sets.
    async fn find_relations(&self, user_id: i32) -> DomainResult<UserRelations>;
}
