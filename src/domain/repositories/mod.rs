//! Repository access for the domain layer
//!
//! Contains:
//! - `RepositoryProvider`: unified access to all per-aggregate repositories
//! - `DomainResult`: standard result type for domain operations

use super::category::CategoryRepository;
use super::comment::CommentRepository;
use super::restaurant::RestaurantRepository;
use super::user::UserRepository;
use crate::shared::errors::DomainError;

/// Result type for domain operations
pub type DomainResult<T> = Result<T, DomainError>;

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let profile = repos.restaurants().find_profile(1).await?;
///     let relations = repos.users().find_relations(7).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn restaurants(&self) -> &dyn RestaurantRepository;
    fn categories(&self) -> &dyn CategoryRepository;
    fn comments(&self) -> &dyn CommentRepository;
    fn users(&self) -> &dyn UserRepository;
}
