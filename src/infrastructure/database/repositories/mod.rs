//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

mod convert;

pub mod category_repository;
pub mod comment_repository;
pub mod repository_provider;
pub mod restaurant_repository;
pub mod user_repository;

pub use repository_provider::SeaOrmRepositoryProvider;
