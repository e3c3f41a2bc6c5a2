//! SeaORM implementation of RestaurantRepository

use std::collections::HashMap;

use async_trait::async_trait;
use log::debug;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, FromQueryResult, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect,
};

use crate::domain::{
    CommentWithAuthor, DomainResult, FavoriteTally, RestaurantFilter, RestaurantProfile,
    RestaurantRepository, RestaurantWithCategory,
};
use crate::infrastructure::database::entities::{category, comment, favorite, restaurant, user};

use super::convert::{
    author_to_domain, category_to_domain, comment_to_domain, db_err, restaurant_to_domain,
};

pub struct SeaOrmRestaurantRepository {
    db: DatabaseConnection,
}

impl SeaOrmRestaurantRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[derive(Debug, FromQueryResult)]
struct FavoriteCount {
    restaurant_id: i32,
    favorite_count: i64,
}

fn with_category(
    (model, category): (restaurant::Model, Option<category::Model>),
) -> RestaurantWithCategory {
    RestaurantWithCategory {
        restaurant: restaurant_to_domain(model),
        category: category.map(category_to_domain),
    }
}

#[async_trait]
impl RestaurantRepository for SeaOrmRestaurantRepository {
    async fn find_restaurants(
        &self,
        filter: RestaurantFilter,
        offset: u64,
        limit: u64,
    ) -> DomainResult<(Vec<RestaurantWithCategory>, u64)> {
        let mut query = restaurant::Entity::find();
        if let Some(category_id) = filter.category_id {
            query = query.filter(restaurant::Column::CategoryId.eq(category_id));
        }

        let total = query.clone().count(&self.db).await.map_err(db_err)?;
        if offset >= total {
            return Ok((Vec::new(), total));
        }

        let rows = query
            .order_by_asc(restaurant::Column::Id)
            .offset(offset)
            .limit(limit)
            .find_also_related(category::Entity)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        debug!("Loaded {} of {} restaurants at offset {}", rows.len(), total, offset);
        Ok((rows.into_iter().map(with_category).collect(), total))
    }

    async fn find_profile(&self, id: i32) -> DomainResult<Option<RestaurantProfile>> {
        let found = restaurant::Entity::find_by_id(id)
            .find_also_related(category::Entity)
            .one(&self.db)
            .await
            .map_err(db_err)?;

        let Some((model, category)) = found else {
            return Ok(None);
        };

        let comments = comment::Entity::find()
            .filter(comment::Column::RestaurantId.eq(id))
            .order_by_desc(comment::Column::CreatedAt)
            .order_by_desc(comment::Column::Id)
            .find_also_related(user::Entity)
            .all(&self.db)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(|(comment, user)| CommentWithAuthor {
                comment: comment_to_domain(comment),
                user: user.map(author_to_domain),
            })
            .collect();

        Ok(Some(RestaurantProfile {
            restaurant: restaurant_to_domain(model),
            category: category.map(category_to_domain),
            comments,
        }))
    }

    async fn find_recent(&self, limit: u64) -> DomainResult<Vec<RestaurantWithCategory>> {
        let rows = restaurant::Entity::find()
            .order_by_desc(restaurant::Column::CreatedAt)
            .order_by_desc(restaurant::Column::Id)
            .limit(limit)
            .find_also_related(category::Entity)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(rows.into_iter().map(with_category).collect())
    }

    async fn favorite_tallies(&self) -> DomainResult<Vec<FavoriteTally>> {
        let counts: HashMap<i32, u64> = favorite::Entity::find()
            .select_only()
            .column(favorite::Column::RestaurantId)
            .column_as(Expr::col(favorite::Column::Id).count(), "favorite_count")
            .group_by(favorite::Column::RestaurantId)
            .into_model::<FavoriteCount>()
            .all(&self.db)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(|c| (c.restaurant_id, u64::try_from(c.favorite_count).unwrap_or(0)))
            .collect();

        let rows = restaurant::Entity::find()
            .order_by_asc(restaurant::Column::Id)
            .find_also_related(category::Entity)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        Ok(rows
            .into_iter()
            .map(|(model, category)| FavoriteTally {
                favorite_count: counts.get(&model.id).copied().unwrap_or(0),
                restaurant: restaurant_to_domain(model),
                category: category.map(category_to_domain),
            })
            .collect())
    }

    async fn exists(&self, id: i32) -> DomainResult<bool> {
        let count = restaurant::Entity::find_by_id(id)
            .count(&self.db)
            .await
            .map_err(db_err)?;
        Ok(count > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::test_support::*;

    #[tokio::test]
    async fn pages_and_counts_with_category_filter() {
        let db = empty_database().await;
        let thai = insert_category(&db, "Thai").await;
        let pizza = insert_category(&db, "Pizza").await;
        for i in 0..7 {
            let category = if i % 2 == 0 { thai } else { pizza };
            insert_restaurant(&db, &format!("R{}", i), Some(category), i).await;
        }
        insert_restaurant(&db, "Uncategorized", None, 8).await;
        let repo = SeaOrmRestaurantRepository::new(db);

        let (rows, total) = repo
            .find_restaurants(RestaurantFilter::default(), 0, 3)
            .await
            .unwrap();
        assert_eq!(total, 8);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].restaurant.name, "R0");
        assert_eq!(rows[0].category.as_ref().unwrap().name, "Thai");

        let filter = RestaurantFilter {
            category_id: Some(thai),
        };
        let (rows, total) = repo.find_restaurants(filter, 3, 3).await.unwrap();
        assert_eq!(total, 4);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].restaurant.name, "R6");
    }

    #[tokio::test]
    async fn offset_past_end_yields_empty_page() {
        let db = empty_database().await;
        insert_restaurant(&db, "Only", None, 0).await;
        let repo = SeaOrmRestaurantRepository::new(db);

        let (rows, total) = repo
            .find_restaurants(RestaurantFilter::default(), u64::MAX, 10)
            .await
            .unwrap();
        assert_eq!(total, 1);
        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn profile_lists_comments_newest_first_with_authors() {
        let db = empty_database().await;
        let user = insert_user(&db, "Ann").await;
        let id = insert_restaurant(&db, "Dumplings", None, 0).await;
        insert_comment(&db, user, id, "first", 1).await;
        insert_comment(&db, user, id, "second", 2).await;
        let repo = SeaOrmRestaurantRepository::new(db);

        let profile = repo.find_profile(id).await.unwrap().unwrap();
        assert!(profile.category.is_none());
        let texts: Vec<_> = profile.comments.iter().map(|c| c.comment.text.as_str()).collect();
        assert_eq!(texts, vec!["second", "first"]);
        assert_eq!(profile.comments[0].user.as_ref().unwrap().name, "Ann");

        assert!(repo.find_profile(id + 100).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn recent_restaurants_are_newest_first() {
        let db = empty_database().await;
        insert_restaurant(&db, "Old", None, 0).await;
        insert_restaurant(&db, "Newest", None, 10).await;
        insert_restaurant(&db, "Middle", None, 5).await;
        let repo = SeaOrmRestaurantRepository::new(db);

        let names: Vec<_> = repo
            .find_recent(2)
            .await
            .unwrap()
            .into_iter()
            .map(|r| r.restaurant.name)
            .collect();
        assert_eq!(names, vec!["Newest", "Middle"]);
    }

    #[tokio::test]
    async fn tallies_include_restaurants_without_favorites() {
        let db = empty_database().await;
        let ann = insert_user(&db, "Ann").await;
        let bob = insert_user(&db, "Bob").await;
        let a = insert_restaurant(&db, "A", None, 0).await;
        let b = insert_restaurant(&db, "B", None, 1).await;
        insert_favorite(&db, ann, b).await;
        insert_favorite(&db, bob, b).await;
        insert_favorite(&db, ann, a).await;
        let c = insert_restaurant(&db, "C", None, 2).await;
        let repo = SeaOrmRestaurantRepository::new(db);

        let tallies: Vec<_> = repo
            .favorite_tallies()
            .await
            .unwrap()
            .into_iter()
            .map(|t| (t.restaurant.id, t.favorite_count))
            .collect();
        assert_eq!(tallies, vec![(a, 1), (b, 2), (c, 0)]);
    }

    #[tokio::test]
    async fn exists_checks_the_id() {
        let db = empty_database().await;
        let id = insert_restaurant(&db, "Here", None, 0).await;
        let repo = SeaOrmRestaurantRepository::new(db);

        assert!(repo.exists(id).await.unwrap());
        assert!(!repo.exists(id + 1).await.unwrap());
    }
}
