//! # Restaurant Review Service
//!
//! Browse restaurants by category, read and post comments, and see which
//! places users favorite most.
//!
//! ## Architecture
//!
//! - **domain**: entities, read projections, repository traits, pagination/ranking rules
//! - **application**: use cases (`RestaurantService`, `CommentService`)
//! - **infrastructure**: SeaORM repositories and migrations, in-memory repositories
//! - **interfaces**: axum router, view rendering, current-user middleware
//! - **shared**: error types, pagination calculator, shutdown signal

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod shared;

pub use config::{default_config_path, AppConfig, StorageBackend};

pub use infrastructure::{
    init_database, DatabaseConfig, InMemoryRepositoryProvider, SeaOrmRepositoryProvider,
};

pub use interfaces::http::{create_app_router, AppState};
