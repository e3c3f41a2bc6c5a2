//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::{
    CategoryRepository, CommentRepository, RepositoryProvider, RestaurantRepository,
    UserRepository,
};

use super::category_repository::SeaOrmCategoryRepository;
use super::comment_repository::SeaOrmCommentRepository;
use super::restaurant_repository::SeaOrmRestaurantRepository;
use super::user_repository::SeaOrmUserRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let (page, total) = repos.restaurants().find_restaurants(filter, 0, 10).await?;
/// let relations = repos.users().find_relations(user_id).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    restaurants: SeaOrmRestaurantRepository,
    categories: SeaOrmCategoryRepository,
    comments: SeaOrmCommentRepository,
    users: SeaOrmUserRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            restaurants: SeaOrmRestaurantRepository::new(db.clone()),
            categories: SeaOrmCategoryRepository::new(db.clone()),
            comments: SeaOrmCommentRepository::new(db.clone()),
            users: SeaOrmUserRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn restaurants(&self) -> &dyn RestaurantRepository {
        &self.restaurants
    }

    fn categories(&self) -> &dyn CategoryRepository {
        &self.categories
    }

    fn comments(&self) -> &dyn CommentRepository {
        &self.comments
    }

    fn users(&self) -> &dyn UserRepository {
        &self.users
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RestaurantFilter;
    use crate::infrastructure::database::test_support::seeded_database;

    #[tokio::test]
    async fn seeded_database_is_browsable() {
        let repos = SeaOrmRepositoryProvider::new(seeded_database().await);

        let (rows, total) = repos
            .restaurants()
            .find_restaurants(RestaurantFilter::default(), 0, 10)
            .await
            .unwrap();
        assert_eq!(total, 30);
        assert_eq!(rows.len(), 10);
        assert!(rows.iter().all(|r| r.category.is_some()));

        assert_eq!(repos.categories().find_all().await.unwrap().len(), 6);
        let demo = repos.users().find_by_id(1).await.unwrap().unwrap();
        let relations = repos.users().find_relations(demo.id).await.unwrap();
        assert_eq!(relations.favorited.len(), 10);
        assert_eq!(relations.liked.len(), 8);
        assert_eq!(repos.comments().find_recent(10).await.unwrap().len(), 5);
    }
}
