//! Database entities module

pub mod category;
pub mod comment;
pub mod favorite;
pub mod like;
pub mod restaurant;
pub mod user;

pub use category::Entity as Category;
pub use comment::Entity as Comment;
pub use favorite::Entity as Favorite;
pub use like::Entity as Like;
pub use restaurant::Entity as Restaurant;
pub use user::Entity as User;
