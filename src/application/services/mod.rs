pub mod comment;
pub mod restaurant;

pub use comment::CommentService;
pub use restaurant::{Feed, ListingSettings, RestaurantListing, RestaurantQuery, RestaurantService};
