//! SeaORM implementation of UserRepository

use async_trait::async_trait;
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QuerySelect};

use crate::domain::{DomainResult, UserProfile, UserRelations, UserRepository};
use crate::infrastructure::database::entities::{favorite, like, user};

use super::convert::{db_err, user_to_domain};

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<UserProfile>> {
        let model = user::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_err)?;
        Ok(model.map(user_to_domain))
    }

    async fn find_relations(&self, user_id: i32) -> DomainResult<UserRelations> {
        let favorited: Vec<i32> = favorite::Entity::find()
            .select_only()
            .column(favorite::Column::RestaurantId)
            .filter(favorite::Column::UserId.eq(user_id))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let liked: Vec<i32> = like::Entity::find()
            .select_only()
            .column(like::Column::RestaurantId)
            .filter(like::Column::UserId.eq(user_id))
            .into_tuple()
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(UserRelations::new(favorited, liked))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::test_support::*;

    #[tokio::test]
    async fn finds_profile_by_id() {
        let db = empty_database().await;
        let id = insert_user(&db, "Ann").await;
        let repo = SeaOrmUserRepository::new(db);

        let profile = repo.find_by_id(id).await.unwrap().unwrap();
        assert_eq!(profile.name, "Ann");
        assert_eq!(profile.email, "ann@example.com");
        assert!(repo.find_by_id(id + 1).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn relations_are_scoped_to_the_user() {
        let db = empty_database().await;
        let ann = insert_user(&db, "Ann").await;
        let bob = insert_user(&db, "Bob").await;
        let a = insert_restaurant(&db, "A", None, 0).await;
        let b = insert_restaurant(&db, "B", None, 0).await;
        insert_favorite(&db, ann, a).await;
        insert_like(&db, ann, b).await;
        insert_favorite(&db, bob, b).await;
        let repo = SeaOrmUserRepository::new(db);

        assert_eq!(
            repo.find_relations(ann).await.unwrap(),
            UserRelations::new([a], [b])
        );
        assert_eq!(
            repo.find_relations(9_999).await.unwrap(),
            UserRelations::default()
        );
    }
}
