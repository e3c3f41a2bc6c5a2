pub mod entities;
pub mod migrator;
pub mod repositories;

pub use repositories::SeaOrmRepositoryProvider;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Database URL (e.g., "sqlite://./restaurants.db?mode=rwc")
    pub url: String,
    /// Upper bound for the connection pool
    pub max_connections: u32,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://./restaurants.db?mode=rwc".to_string(),
            max_connections: 10,
        }
    }
}

/// Initialize database connection
pub async fn init_database(config: &DatabaseConfig) -> Result<DatabaseConnection, sea_orm::DbErr> {
    info!("Connecting to database: {}", config.url);
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections.max(1))
        .sqlx_logging(false);
    let db = Database::connect(options).await?;
    info!("Database connected successfully");
    Ok(db)
}

/// Fresh in-memory SQLite with the schema applied and no seed rows,
/// plus insert helpers for fixtures.
#[cfg(test)]
pub(crate) mod test_support {
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use sea_orm::{ActiveModelTrait, ActiveValue::NotSet, DatabaseConnection, Set};
    use sea_orm_migration::MigratorTrait;

    use super::entities::{category, comment, favorite, like, restaurant, user};
    use super::migrator::Migrator;
    use super::{init_database, DatabaseConfig};

    /// Number of schema migrations before the seed migration
    const SCHEMA_MIGRATIONS: u32 = 6;

    pub async fn empty_database() -> DatabaseConnection {
        let db = in_memory().await;
        Migrator::up(&db, Some(SCHEMA_MIGRATIONS)).await.unwrap();
        db
    }

    pub async fn seeded_database() -> DatabaseConnection {
        let db = in_memory().await;
        Migrator::up(&db, None).await.unwrap();
        db
    }

    async fn in_memory() -> DatabaseConnection {
        init_database(&DatabaseConfig {
            url: "sqlite::memory:".to_string(),
            max_connections: 1,
        })
        .await
        .unwrap()
    }

    /// Deterministic timestamps, `n` minutes after a fixed origin
    pub fn at(n: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, 12, 0, 0).unwrap() + Duration::minutes(n)
    }

    pub async fn insert_user(db: &DatabaseConnection, name: &str) -> i32 {
        user::ActiveModel {
            id: NotSet,
            name: Set(name.to_string()),
            email: Set(format!("{}@example.com", name.to_lowercase())),
            created_at: Set(at(0)),
            updated_at: Set(at(0)),
        }
        .insert(db)
        .await
        .unwrap()
        .id
    }

    pub async fn insert_category(db: &DatabaseConnection, name: &str) -> i32 {
        category::ActiveModel {
            id: NotSet,
            name: Set(name.to_string()),
            created_at: Set(at(0)),
            updated_at: Set(at(0)),
        }
        .insert(db)
        .await
        .unwrap()
        .id
    }

    pub async fn insert_restaurant(
        db: &DatabaseConnection,
        name: &str,
        category_id: Option<i32>,
        minute: i64,
    ) -> i32 {
        restaurant::ActiveModel {
            id: NotSet,
            name: Set(name.to_string()),
            tel: Set("(02) 2345-6789".to_string()),
            address: Set("1 Market Street".to_string()),
            opening_hours: Set("11:00 - 21:00".to_string()),
            description: Set(format!("{} serves food", name)),
            image: Set(None),
            category_id: Set(category_id),
            created_at: Set(at(minute)),
            updated_at: Set(at(minute)),
        }
        .insert(db)
        .await
        .unwrap()
        .id
    }

    pub async fn insert_comment(
        db: &DatabaseConnection,
        user_id: i32,
        restaurant_id: i32,
        text: &str,
        minute: i64,
    ) -> i32 {
        comment::ActiveModel {
            id: NotSet,
            text: Set(text.to_string()),
            user_id: Set(user_id),
            restaurant_id: Set(restaurant_id),
            created_at: Set(at(minute)),
            updated_at: Set(at(minute)),
        }
        .insert(db)
        .await
        .unwrap()
        .id
    }

    pub async fn insert_favorite(db: &DatabaseConnection, user_id: i32, restaurant_id: i32) {
        favorite::ActiveModel {
            id: NotSet,
            user_id: Set(user_id),
            restaurant_id: Set(restaurant_id),
            created_at: Set(at(0)),
        }
        .insert(db)
        .await
        .unwrap();
    }

    pub async fn insert_like(db: &DatabaseConnection, user_id: i32, restaurant_id: i32) {
        like::ActiveModel {
            id: NotSet,
            user_id: Set(user_id),
            restaurant_id: Set(restaurant_id),
            created_at: Set(at(0)),
        }
        .insert(db)
        .await
        .unwrap();
    }
}
