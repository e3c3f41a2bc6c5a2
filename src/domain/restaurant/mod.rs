//! Restaurant aggregate
//!
//! Contains the Restaurant entity, its list/detail projections, the
//! favorite ranking and the repository interface.

pub mod model;
pub mod ranking;
pub mod repository;

pub use model::{
    excerpt, FavoriteTally, RankedRestaurant, Restaurant, RestaurantDetail, RestaurantFilter,
    RestaurantProfile, RestaurantSummary, RestaurantWithCategory,
};
pub use ranking::top_by_favorites;
pub use repository::RestaurantRepository;
