//! Application layer - use-cases orchestrating the domain repositories

pub mod services;

pub use services::{
    CommentService, Feed, ListingSettings, RestaurantListing, RestaurantQuery, RestaurantService,
};
