//! SeaORM implementation of CategoryRepository

use async_trait::async_trait;
use sea_orm::{DatabaseConnection, EntityTrait, QueryOrder};

use crate::domain::{Category, CategoryRepository, DomainResult};
use crate::infrastructure::database::entities::category;

use super::convert::{category_to_domain, db_err};

pub struct SeaOrmCategoryRepository {
    db: DatabaseConnection,
}

impl SeaOrmCategoryRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl CategoryRepository for SeaOrmCategoryRepository {
    async fn find_all(&self) -> DomainResult<Vec<Category>> {
        let models = category::Entity::find()
            .order_by_asc(category::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_err)?;
        Ok(models.into_iter().map(category_to_domain).collect())
    }
}
