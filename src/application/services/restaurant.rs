//! Restaurant browsing use-cases
//!
//! All read paths of the site live here: the paginated listing, the detail
//! page, the activity feed, the dashboard and the favorites ranking.
//! HTTP handlers are thin wrappers that delegate to this service.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;
use utoipa::ToSchema;

use crate::domain::{
    top_by_favorites, Category, DomainError, DomainResult, FeedComment, RankedRestaurant,
    RepositoryProvider, RestaurantDetail, RestaurantFilter, RestaurantProfile, RestaurantSummary,
    RestaurantWithCategory, UserRelations,
};
use crate::shared::{compute_pagination, PageContext};

/// Tunables for the listing pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListingSettings {
    /// Restaurants per listing page
    pub page_size: u64,
    /// Characters of description kept in list views
    pub description_excerpt: usize,
    /// Restaurants and comments shown on the feed
    pub feed_limit: u64,
    /// Entries on the top-restaurants page
    pub top_limit: usize,
}

impl Default for ListingSettings {
    fn default() -> Self {
        Self {
            page_size: 10,
            description_excerpt: 50,
            feed_limit: 10,
            top_limit: 10,
        }
    }
}

/// Listing request after HTTP parameter normalization
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RestaurantQuery {
    /// Requested page (1-based; 0 is treated as 1)
    pub page: u64,
    pub category_id: Option<i32>,
}

/// Everything the `restaurants` view needs
#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RestaurantListing {
    pub restaurants: Vec<RestaurantSummary>,
    pub categories: Vec<Category>,
    /// Category filter in effect, echoed back for the filter widget
    pub category_id: Option<i32>,
    pub page: PageContext,
}

/// Newest restaurants and comments
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Feed {
    pub restaurants: Vec<RestaurantWithCategory>,
    pub comments: Vec<FeedComment>,
}

pub struct RestaurantService {
    repos: Arc<dyn RepositoryProvider>,
    settings: ListingSettings,
}

impl RestaurantService {
    pub fn new(repos: Arc<dyn RepositoryProvider>, settings: ListingSettings) -> Self {
        Self { repos, settings }
    }

    /// One page of restaurants, optionally filtered by category.
    pub async fn list_restaurants(
        &self,
        query: RestaurantQuery,
        relations: &UserRelations,
    ) -> DomainResult<RestaurantListing> {
        let filter = RestaurantFilter {
            category_id: query.category_id,
        };
        let page_size = self.settings.page_size.max(1);
        let offset = query.page.max(1).saturating_sub(1).saturating_mul(page_size);

        let (rows, total) = self
            .repos
            .restaurants()
            .find_restaurants(filter, offset, page_size)
            .await?;
        let page = compute_pagination(total, page_size, query.page);

        debug!(
            total,
            page = page.current_page,
            category_id = ?filter.category_id,
            "Listing restaurants"
        );
        if page.is_out_of_range() {
            debug!(
                page = page.current_page,
                total_pages = page.total_pages,
                "Requested page is past the last page"
            );
        }

        let restaurants = rows
            .iter()
            .map(|row| {
                RestaurantSummary::new(
                    &row.restaurant,
                    row.category.as_ref(),
                    relations,
                    self.settings.description_excerpt,
                )
            })
            .collect();

        let categories = self.repos.categories().find_all().await?;

        Ok(RestaurantListing {
            restaurants,
            categories,
            category_id: filter.category_id,
            page,
        })
    }

    /// A single restaurant with comments and the viewer's favorite/like flags.
    pub async fn get_restaurant(
        &self,
        id: i32,
        relations: &UserRelations,
    ) -> DomainResult<RestaurantDetail> {
        let profile = self.find_profile(id).await?;
        Ok(RestaurantDetail::new(profile, relations))
    }

    /// Newest restaurants and newest comments.
    pub async fn get_feeds(&self) -> DomainResult<Feed> {
        let limit = self.settings.feed_limit;
        let restaurants = self.repos.restaurants().find_recent(limit).await?;
        let comments = self.repos.comments().find_recent(limit).await?;
        Ok(Feed {
            restaurants,
            comments,
        })
    }

    /// A single restaurant with its category and comments.
    pub async fn get_dashboard(&self, id: i32) -> DomainResult<RestaurantProfile> {
        self.find_profile(id).await
    }

    /// The most favorited restaurants, annotated for the viewer.
    pub async fn get_top_restaurants(
        &self,
        relations: &UserRelations,
    ) -> DomainResult<Vec<RankedRestaurant>> {
        let tallies = self.repos.restaurants().favorite_tallies().await?;
        let ranked: Vec<RankedRestaurant> = tallies
            .iter()
            .map(|t| RankedRestaurant {
                summary: RestaurantSummary::new(
                    &t.restaurant,
                    t.category.as_ref(),
                    relations,
                    self.settings.description_excerpt,
                ),
                favorite_count: t.favorite_count,
            })
            .collect();

        Ok(top_by_favorites(&ranked, self.settings.top_limit))
    }

    async fn find_profile(&self, id: i32) -> DomainResult<RestaurantProfile> {
        self.repos
            .restaurants()
            .find_profile(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Restaurant", "id", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::storage::InMemoryRepositoryProvider;

    fn seeded() -> Arc<InMemoryRepositoryProvider> {
        let store = InMemoryRepositoryProvider::new();
        let italian = store.add_category("Italian");
        let thai = store.add_category("Thai");
        for i in 0..25 {
            let category = if i % 5 == 0 { thai } else { italian };
            store.add_restaurant(&format!("Place {}", i + 1), &"d".repeat(80), Some(category));
        }
        Arc::new(store)
    }

    fn service(store: Arc<InMemoryRepositoryProvider>) -> RestaurantService {
        RestaurantService::new(store, ListingSettings::default())
    }

    #[tokio::test]
    async fn listing_returns_requested_slice() {
        let svc = service(seeded());
        let listing = svc
            .list_restaurants(
                RestaurantQuery {
                    page: 3,
                    category_id: None,
                },
                &UserRelations::default(),
            )
            .await
            .unwrap();

        assert_eq!(listing.restaurants.len(), 5);
        assert_eq!(listing.restaurants[0].id, 21);
        assert_eq!(listing.page.total_pages, 3);
        assert_eq!(listing.page.previous_page, 2);
        assert_eq!(listing.page.next_page, 3);
        assert_eq!(listing.categories.len(), 2);
        assert!(listing.restaurants.iter().all(|r| r.description.len() == 50));
    }

    #[tokio::test]
    async fn listing_filters_by_category() {
        let store = seeded();
        let svc = service(store);
        let listing = svc
            .list_restaurants(
                RestaurantQuery {
                    page: 1,
                    category_id: Some(2),
                },
                &UserRelations::default(),
            )
            .await
            .unwrap();

        assert_eq!(listing.page.total_pages, 1);
        assert_eq!(listing.restaurants.len(), 5);
        assert_eq!(listing.category_id, Some(2));
        assert!(listing
            .restaurants
            .iter()
            .all(|r| r.category_name.as_deref() == Some("Thai")));
    }

    #[tokio::test]
    async fn listing_past_last_page_is_empty_not_an_error() {
        let svc = service(seeded());
        let listing = svc
            .list_restaurants(
                RestaurantQuery {
                    page: 9,
                    category_id: None,
                },
                &UserRelations::default(),
            )
            .await
            .unwrap();
        assert!(listing.restaurants.is_empty());
        assert_eq!(listing.page.next_page, 3);
    }

    #[tokio::test]
    async fn listing_marks_viewer_relations() {
        let svc = service(seeded());
        let relations = UserRelations::new([1], [2]);
        let listing = svc
            .list_restaurants(RestaurantQuery::default(), &relations)
            .await
            .unwrap();

        assert!(listing.restaurants[0].is_favorited);
        assert!(!listing.restaurants[0].is_liked);
        assert!(listing.restaurants[1].is_liked);
    }

    #[tokio::test]
    async fn detail_of_missing_restaurant_is_not_found() {
        let svc = service(seeded());
        let err = svc
            .get_restaurant(999, &UserRelations::default())
            .await
            .unwrap_err();
        assert!(matches!(err, DomainError::NotFound { .. }));
    }

    #[tokio::test]
    async fn detail_includes_comments_and_flags() {
        let store = seeded();
        let user = store.add_user("Ann", "ann@example.com");
        store.add_comment(user, 4, "first");
        store.add_comment(user, 4, "second");
        let svc = service(store);

        let detail = svc
            .get_restaurant(4, &UserRelations::new([4], [4]))
            .await
            .unwrap();
        assert!(detail.is_favorited && detail.is_liked);
        let texts: Vec<_> = detail
            .restaurant
            .comments
            .iter()
            .map(|c| c.comment.text.as_str())
            .collect();
        assert_eq!(texts, vec!["second", "first"]);
        assert_eq!(detail.restaurant.comments[0].user.as_ref().map(|u| u.id), Some(user));
    }

    #[tokio::test]
    async fn feed_is_bounded_and_newest_first() {
        let store = seeded();
        let user = store.add_user("Ann", "ann@example.com");
        for i in 0..12 {
            store.add_comment(user, 1, &format!("c{}", i));
        }
        let svc = service(store);

        let feed = svc.get_feeds().await.unwrap();
        assert_eq!(feed.restaurants.len(), 10);
        assert_eq!(feed.restaurants[0].restaurant.id, 25);
        assert_eq!(feed.comments.len(), 10);
        assert_eq!(feed.comments[0].comment.text, "c11");
        assert_eq!(feed.comments[0].restaurant.as_ref().map(|r| r.id), Some(1));
    }

    #[tokio::test]
    async fn dashboard_returns_profile() {
        let svc = service(seeded());
        let profile = svc.get_dashboard(2).await.unwrap();
        assert_eq!(profile.restaurant.id, 2);
        assert_eq!(profile.category.map(|c| c.name), Some("Italian".to_string()));
        assert!(matches!(
            svc.get_dashboard(0).await,
            Err(DomainError::NotFound { .. })
        ));
    }

    #[tokio::test]
    async fn top_restaurants_ranked_by_favorites() {
        let store = seeded();
        let a = store.add_user("A", "a@example.com");
        let b = store.add_user("B", "b@example.com");
        store.add_favorite(a, 3);
        store.add_favorite(b, 3);
        store.add_favorite(a, 7);
        store.add_favorite(b, 5);
        let svc = service(store);

        let top = svc
            .get_top_restaurants(&UserRelations::new([7], []))
            .await
            .unwrap();
        assert_eq!(top.len(), 10);
        let ids: Vec<_> = top.iter().map(|r| r.summary.id).collect();
        assert_eq!(&ids[..4], &[3, 5, 7, 1]);
        assert_eq!(top[0].favorite_count, 2);
        assert!(top[2].summary.is_favorited);
    }
}
