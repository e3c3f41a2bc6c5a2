//! In-memory repository implementation
//!
//! Backs every repository trait with `DashMap`s. Used by tests and by
//! `database.backend = "memory"` for running the site without a database.

use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;

use crate::domain::{
    Category, CategoryRepository, Comment, CommentAuthor, CommentRepository, CommentWithAuthor,
    DomainResult, FavoriteTally, FeedComment, NewComment, RepositoryProvider, Restaurant,
    RestaurantFilter, RestaurantProfile, RestaurantRepository, RestaurantWithCategory, UserProfile,
    UserRelations, UserRepository,
};

/// In-memory storage for development and testing
pub struct InMemoryRepositoryProvider {
    users: DashMap<i32, UserProfile>,
    categories: DashMap<i32, Category>,
    restaurants: DashMap<i32, Restaurant>,
    comments: DashMap<i32, Comment>,
    /// (user_id, restaurant_id)
    favorites: DashMap<(i32, i32), ()>,
    /// (user_id, restaurant_id)
    likes: DashMap<(i32, i32), ()>,
    user_counter: AtomicI32,
    category_counter: AtomicI32,
    restaurant_counter: AtomicI32,
    comment_counter: AtomicI32,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        Self {
            users: DashMap::new(),
            categories: DashMap::new(),
            restaurants: DashMap::new(),
            comments: DashMap::new(),
            favorites: DashMap::new(),
            likes: DashMap::new(),
            user_counter: AtomicI32::new(1),
            category_counter: AtomicI32::new(1),
            restaurant_counter: AtomicI32::new(1),
            comment_counter: AtomicI32::new(1),
        }
    }

    /// Store with a few categories, a demo user and restaurants.
    pub fn with_demo_data() -> Self {
        let store = Self::new();
        let user = store.add_user("Demo User", "demo@example.com");
        let categories: Vec<i32> = ["Chinese", "Japanese", "Italian", "Mexican"]
            .iter()
            .map(|name| store.add_category(name))
            .collect();
        for i in 0..24 {
            let id = store.add_restaurant(
                &format!("Demo Restaurant {}", i + 1),
                "A neighbourhood favourite serving seasonal dishes made from local produce.",
                Some(categories[i % categories.len()]),
            );
            if i % 3 == 0 {
                store.add_favorite(user, id);
            }
            if i % 4 == 0 {
                store.add_like(user, id);
            }
        }
        store
    }

    pub fn add_user(&self, name: &str, email: &str) -> i32 {
        let id = self.user_counter.fetch_add(1, Ordering::SeqCst);
        self.users.insert(
            id,
            UserProfile {
                id,
                name: name.to_string(),
                email: email.to_string(),
                created_at: Utc::now(),
            },
        );
        id
    }

    pub fn add_category(&self, name: &str) -> i32 {
        let id = self.category_counter.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        self.categories.insert(
            id,
            Category {
                id,
                name: name.to_string(),
                created_at: now,
                updated_at: now,
            },
        );
        id
    }

    pub fn add_restaurant(&self, name: &str, description: &str, category_id: Option<i32>) -> i32 {
        let id = self.restaurant_counter.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        self.restaurants.insert(
            id,
            Restaurant {
                id,
                name: name.to_string(),
                tel: String::new(),
                address: String::new(),
                opening_hours: String::new(),
                description: description.to_string(),
                image: None,
                category_id,
                created_at: now,
                updated_at: now,
            },
        );
        id
    }

    pub fn add_comment(&self, user_id: i32, restaurant_id: i32, text: &str) -> i32 {
        self.insert_comment(user_id, restaurant_id, text.to_string()).id
    }

    pub fn add_favorite(&self, user_id: i32, restaurant_id: i32) {
        self.favorites.insert((user_id, restaurant_id), ());
    }

    pub fn add_like(&self, user_id: i32, restaurant_id: i32) {
        self.likes.insert((user_id, restaurant_id), ());
    }

    fn insert_comment(&self, user_id: i32, restaurant_id: i32, text: String) -> Comment {
        let id = self.comment_counter.fetch_add(1, Ordering::SeqCst);
        let now = Utc::now();
        let comment = Comment {
            id,
            text,
            user_id,
            restaurant_id,
            created_at: now,
            updated_at: now,
        };
        self.comments.insert(id, comment.clone());
        comment
    }

    fn category_of(&self, restaurant: &Restaurant) -> Option<Category> {
        restaurant
            .category_id
            .and_then(|id| self.categories.get(&id).map(|c| c.clone()))
    }

    fn with_category(&self, restaurant: Restaurant) -> RestaurantWithCategory {
        RestaurantWithCategory {
            category: self.category_of(&restaurant),
            restaurant,
        }
    }

    fn restaurants_by_id(&self) -> Vec<Restaurant> {
        let mut all: Vec<Restaurant> = self.restaurants.iter().map(|e| e.value().clone()).collect();
        all.sort_by_key(|r| r.id);
        all
    }

    /// Comments matching `keep`, newest first
    fn comments_newest_first(&self, keep: impl Fn(&Comment) -> bool) -> Vec<Comment> {
        let mut comments: Vec<Comment> = self
            .comments
            .iter()
            .filter(|e| keep(e.value()))
            .map(|e| e.value().clone())
            .collect();
        comments.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        comments
    }
}

impl Default for InMemoryRepositoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryProvider for InMemoryRepositoryProvider {
    fn restaurants(&self) -> &dyn RestaurantRepository {
        self
    }

    fn categories(&self) -> &dyn CategoryRepository {
        self
    }

    fn comments(&self) -> &dyn CommentRepository {
        self
    }

    fn users(&self) -> &dyn UserRepository {
        self
    }
}

#[async_trait]
impl RestaurantRepository for InMemoryRepositoryProvider {
    async fn find_restaurants(
        &self,
        filter: RestaurantFilter,
        offset: u64,
        limit: u64,
    ) -> DomainResult<(Vec<RestaurantWithCategory>, u64)> {
        let matching: Vec<Restaurant> = self
            .restaurants_by_id()
            .into_iter()
            .filter(|r| filter.category_id.map_or(true, |c| r.category_id == Some(c)))
            .collect();
        let total = matching.len() as u64;

        let rows = matching
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .map(|r| self.with_category(r))
            .collect();
        Ok((rows, total))
    }

    async fn find_profile(&self, id: i32) -> DomainResult<Option<RestaurantProfile>> {
        let Some(restaurant) = self.restaurants.get(&id).map(|r| r.clone()) else {
            return Ok(None);
        };

        let comments = self
            .comments_newest_first(|c| c.restaurant_id == id)
            .into_iter()
            .map(|comment| CommentWithAuthor {
                user: self.users.get(&comment.user_id).map(|u| CommentAuthor::from(u.clone())),
                comment,
            })
            .collect();

        Ok(Some(RestaurantProfile {
            category: self.category_of(&restaurant),
            restaurant,
            comments,
        }))
    }

    async fn find_recent(&self, limit: u64) -> DomainResult<Vec<RestaurantWithCategory>> {
        let mut all = self.restaurants_by_id();
        all.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
        Ok(all
            .into_iter()
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .map(|r| self.with_category(r))
            .collect())
    }

    async fn favorite_tallies(&self) -> DomainResult<Vec<FavoriteTally>> {
        Ok(self
            .restaurants_by_id()
            .into_iter()
            .map(|restaurant| {
                let favorite_count = self
                    .favorites
                    .iter()
                    .filter(|e| e.key().1 == restaurant.id)
                    .count() as u64;
                FavoriteTally {
                    category: self.category_of(&restaurant),
                    restaurant,
                    favorite_count,
                }
            })
            .collect())
    }

    async fn exists(&self, id: i32) -> DomainResult<bool> {
        Ok(self.restaurants.contains_key(&id))
    }
}

#[async_trait]
impl CategoryRepository for InMemoryRepositoryProvider {
    async fn find_all(&self) -> DomainResult<Vec<Category>> {
        let mut all: Vec<Category> = self.categories.iter().map(|e| e.value().clone()).collect();
        all.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(all)
    }
}

#[async_trait]
impl CommentRepository for InMemoryRepositoryProvider {
    async fn find_recent(&self, limit: u64) -> DomainResult<Vec<FeedComment>> {
        Ok(self
            .comments_newest_first(|_| true)
            .into_iter()
            .take(usize::try_from(limit).unwrap_or(usize::MAX))
            .map(|comment| FeedComment {
                user: self.users.get(&comment.user_id).map(|u| CommentAuthor::from(u.clone())),
                restaurant: self.restaurants.get(&comment.restaurant_id).map(|r| r.clone()),
                comment,
            })
            .collect())
    }

    async fn create(&self, user_id: i32, comment: NewComment) -> DomainResult<Comment> {
        Ok(self.insert_comment(user_id, comment.restaurant_id, comment.text))
    }
}

#[async_trait]
impl UserRepository for InMemoryRepositoryProvider {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<UserProfile>> {
        Ok(self.users.get(&id).map(|u| u.clone()))
    }

    async fn find_relations(&self, user_id: i32) -> DomainResult<UserRelations> {
        let favorited = self
            .favorites
            .iter()
            .filter(|e| e.key().0 == user_id)
            .map(|e| e.key().1);
        let liked = self
            .likes
            .iter()
            .filter(|e| e.key().0 == user_id)
            .map(|e| e.key().1);
        Ok(UserRelations::new(favorited, liked))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn relations_only_include_own_rows() {
        let store = InMemoryRepositoryProvider::new();
        let a = store.add_user("A", "a@example.com");
        let b = store.add_user("B", "b@example.com");
        store.add_favorite(a, 1);
        store.add_like(a, 2);
        store.add_favorite(b, 3);

        let rel = store.find_relations(a).await.unwrap();
        assert_eq!(rel, UserRelations::new([1], [2]));
        assert_eq!(store.find_relations(99).await.unwrap(), UserRelations::default());
    }

    #[tokio::test]
    async fn categories_sorted_by_name() {
        let store = InMemoryRepositoryProvider::new();
        store.add_category("Thai");
        store.add_category("Italian");
        let names: Vec<_> = CategoryRepository::find_all(&store)
            .await
            .unwrap()
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Italian", "Thai"]);
    }

    #[tokio::test]
    async fn demo_data_is_browsable() {
        let store = InMemoryRepositoryProvider::with_demo_data();
        let (rows, total) = store
            .find_restaurants(RestaurantFilter::default(), 0, 10)
            .await
            .unwrap();
        assert_eq!(total, 24);
        assert_eq!(rows.len(), 10);
        assert!(rows.iter().all(|r| r.category.is_some()));
    }
}
