//! SeaORM implementation of CommentRepository

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use log::info;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set,
};

use crate::domain::{Comment, CommentRepository, DomainResult, FeedComment, NewComment};
use crate::infrastructure::database::entities::{comment, restaurant, user};

use super::convert::{author_to_domain, comment_to_domain, db_err, restaurant_to_domain};

pub struct SeaOrmCommentRepository {
    db: DatabaseConnection,
}

impl SeaOrmCommentRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CommentRepository for SeaOrmCommentRepository {
    async fn find_recent(&self, limit: u64) -> DomainResult<Vec<FeedComment>> {
        let rows = comment::Entity::find()
            .order_by_desc(comment::Column::CreatedAt)
            .order_by_desc(comment::Column::Id)
            .limit(limit)
            .find_also_related(user::Entity)
            .all(&self.db)
            .await
            .map_err(db_err)?;

        let restaurant_ids: Vec<i32> = rows.iter().map(|(c, _)| c.restaurant_id).collect();
        let restaurants: HashMap<i32, restaurant::Model> = restaurant::Entity::find()
            .filter(restaurant::Column::Id.is_in(restaurant_ids))
            .all(&self.db)
            .await
            .map_err(db_err)?
            .into_iter()
            .map(|r| (r.id, r))
            .collect();

        Ok(rows
            .into_iter()
            .map(|(comment, user)| FeedComment {
                // Several comments may share a restaurant
                restaurant: restaurants
                    .get(&comment.restaurant_id)
                    .cloned()
                    .map(restaurant_to_domain),
                user: user.map(author_to_domain),
                comment: comment_to_domain(comment),
            })
            .collect())
    }

    async fn create(&self, user_id: i32, new_comment: NewComment) -> DomainResult<Comment> {
        let now = Utc::now();
        let model = comment::ActiveModel {
            id: NotSet,
            text: Set(new_comment.text),
            user_id: Set(user_id),
            restaurant_id: Set(new_comment.restaurant_id),
            created_at: Set(now),
            updated_at: Set(now),
        };
        let result = model.insert(&self.db).await.map_err(db_err)?;
        info!(
            "Comment saved: {} on restaurant {}",
            result.id, result.restaurant_id
        );
        Ok(comment_to_domain(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::database::test_support::*;

    #[tokio::test]
    async fn feed_comments_carry_user_and_restaurant() {
        let db = empty_database().await;
        let ann = insert_user(&db, "Ann").await;
        let noodles = insert_restaurant(&db, "Noodles", None, 0).await;
        let tacos = insert_restaurant(&db, "Tacos", None, 0).await;
        insert_comment(&db, ann, noodles, "oldest", 1).await;
        insert_comment(&db, ann, tacos, "middle", 2).await;
        insert_comment(&db, ann, noodles, "newest", 3).await;
        let repo = SeaOrmCommentRepository::new(db);

        let feed = repo.find_recent(2).await.unwrap();
        assert_eq!(feed.len(), 2);
        assert_eq!(feed[0].comment.text, "newest");
        assert_eq!(feed[0].restaurant.as_ref().unwrap().name, "Noodles");
        assert_eq!(feed[1].restaurant.as_ref().unwrap().name, "Tacos");
        assert_eq!(feed[1].user.as_ref().unwrap().id, ann);
    }

    #[tokio::test]
    async fn created_comment_is_persisted() {
        let db = empty_database().await;
        let ann = insert_user(&db, "Ann").await;
        let id = insert_restaurant(&db, "Noodles", None, 0).await;
        let repo = SeaOrmCommentRepository::new(db);

        let created = repo
            .create(
                ann,
                NewComment {
                    restaurant_id: id,
                    text: "tasty".into(),
                },
            )
            .await
            .unwrap();
        assert_eq!(created.user_id, ann);
        assert_eq!(created.restaurant_id, id);

        let feed = repo.find_recent(10).await.unwrap();
        assert_eq!(feed[0].comment.id, created.id);
        assert_eq!(feed[0].comment.text, "tasty");
    }
}
