use async_trait::async_trait;

use super::model::Category;
use crate::domain::DomainResult;

#[async_trait]
pub trait CategoryRepository: Send + Sync {
    /// All categories, ordered by name.
    async fn find_all(&self) -> DomainResult<Vec<Category>>;
}
