//! Restaurant repository interface

use async_trait::async_trait;

use super::model::{FavoriteTally, RestaurantFilter, RestaurantProfile, RestaurantWithCategory};
use crate::domain::DomainResult;

#[async_trait]
pub trait RestaurantRepository: Send + Sync {
    /// One slice of the filtered listing, ordered by id, plus the total
    /// number of rows matching `filter`.
    async fn find_restaurants(
        &self,
        filter: RestaurantFilter,
        offset: u64,
        limit: u64,
    ) -> DomainResult<(Vec<RestaurantWithCategory>, u64)>;

    /// Restaurant with category and comments (newest first, with authors).
    async fn find_profile(&self, id: i32) -> DomainResult<Option<RestaurantProfile>>;

    /// Newest restaurants first.
    async fn find_recent(&self, limit: u64) -> DomainResult<Vec<RestaurantWithCategory>>;

    /// Every restaurant with its favorite count, ordered by id.
    async fn favorite_tallies(&self) -> DomainResult<Vec<FavoriteTally>>;

    async fn exists(&self, id: i32) -> DomainResult<bool>;
}
