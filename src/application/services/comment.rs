//! Comment posting

use std::sync::Arc;

use tracing::info;

use crate::domain::{Comment, DomainError, DomainResult, NewComment, RepositoryProvider};

pub struct CommentService {
    repos: Arc<dyn RepositoryProvider>,
}

impl CommentService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    /// Post a comment as `user_id` on an existing restaurant.
    pub async fn post_comment(&self, user_id: i32, comment: NewComment) -> DomainResult<Comment> {
        let comment = comment.normalized()?;

        if !self.repos.restaurants().exists(comment.restaurant_id).await? {
            return Err(DomainError::not_found(
                "Restaurant",
                "id",
                comment.restaurant_id,
            ));
        }

        let created = self.repos.comments().create(user_id, comment).await?;
        info!(
            comment_id = created.id,
            user_id,
            restaurant_id = created.restaurant_id,
            "Comment posted"
        );
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::InMemoryRepositoryProvider;

    #[tokio::test]
    async fn posts_trimmed_comment() {
        let store = Arc::new(InMemoryRepositoryProvider::new());
        let user = store.add_user("Bo", "bo@example.com");
        let restaurant = store.add_restaurant("Noodle Bar", "Hand-pulled noodles", None);
        let svc = CommentService::new(store.clone());

        let created = svc
            .post_comment(
                user,
                NewComment {
                    restaurant_id: restaurant,
                    text: "  slurp  ".into(),
                },
            )
            .await
            .unwrap();

        assert_eq!(created.text, "slurp");
        assert_eq!(created.user_id, user);
        let recent = store.comments().find_recent(5).await.unwrap();
        assert_eq!(recent.len(), 1);
    }

    #[tokio::test]
    async fn unknown_restaurant_is_not_found() {
        let store = Arc::new(InMemoryRepositoryProvider::new());
        let user = store.add_user("Bo", "bo@example.com");
        let svc = CommentService::new(store);

        let err = svc
            .post_comment(
                user,
                NewComment {
                    restaurant_id: 404,
                    text: "hello".into(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn blank_comment_is_rejected_before_storage() {
        let store = Arc::new(InMemoryRepositoryProvider::new());
        let svc = CommentService::new(store.clone());

        let err = svc
            .post_comment(
                1,
                NewComment {
                    restaurant_id: 1,
                    text: " ".into(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert!(store.comments().find_recent(5).await.unwrap().is_empty());
    }
}
