//! Seed development data (categories, a demo user and restaurants)
//!
//! Skipped when users or restaurants already exist.

use chrono::Utc;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::ConnectionTrait;

use super::m20240101_000001_create_users::Users;
use super::m20240101_000002_create_categories::Categories;
use super::m20240101_000003_create_restaurants::Restaurants;
use super::m20240101_000004_create_comments::Comments;
use super::m20240101_000005_create_favorites::Favorites;
use super::m20240101_000006_create_likes::Likes;

const CATEGORIES: [(&str, &str); 6] = [
    ("Chinese", "Wok House"),
    ("Japanese", "Sushi Bar"),
    ("Italian", "Trattoria"),
    ("Mexican", "Taqueria"),
    ("Thai", "Noodle Kitchen"),
    ("Vegetarian", "Green Table"),
];

const PREFIXES: [&str; 5] = ["Golden", "Harbour", "Old Town", "Lucky", "Corner"];

const RESTAURANT_COUNT: usize = 30;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let db = manager.get_connection();

        if row_count(db, count_rows(Users::Table)).await? > 0
            || row_count(db, count_rows(Restaurants::Table)).await? > 0
        {
            return Ok(());
        }

        let now = Utc::now();

        let user_id = insert_row(
            db,
            Query::insert()
                .into_table(Users::Table)
                .columns([Users::Name, Users::Email, Users::CreatedAt, Users::UpdatedAt])
                .values_panic([
                    "Demo User".into(),
                    "demo@example.com".into(),
                    now.into(),
                    now.into(),
                ])
                .to_owned(),
        )
        .await?;

        let mut category_ids = Vec::with_capacity(CATEGORIES.len());
        for (name, _) in CATEGORIES {
            let id = insert_row(
                db,
                Query::insert()
                    .into_table(Categories::Table)
                    .columns([
                        Categories::Name,
                        Categories::CreatedAt,
                        Categories::UpdatedAt,
                    ])
                    .values_panic([name.into(), now.into(), now.into()])
                    .to_owned(),
            )
            .await?;
            category_ids.push(id);
        }

        for i in 0..RESTAURANT_COUNT {
            let slot = i % CATEGORIES.len();
            let (category_name, kind) = CATEGORIES[slot];
            let name = format!("{} {}", PREFIXES[i % PREFIXES.len()], kind);
            let description = format!(
                "{} is a neighbourhood {} spot serving seasonal dishes made from local produce, \
                 with a short daily menu and friendly staff.",
                name,
                category_name.to_lowercase()
            );

            let restaurant_id = insert_row(
                db,
                Query::insert()
                    .into_table(Restaurants::Table)
                    .columns([
                        Restaurants::Name,
                        Restaurants::Tel,
                        Restaurants::Address,
                        Restaurants::OpeningHours,
                        Restaurants::Description,
                        Restaurants::CategoryId,
                        Restaurants::CreatedAt,
                        Restaurants::UpdatedAt,
                    ])
                    .values_panic([
                        name.into(),
                        format!("(02) 2{:03}-{:04}", i + 100, (i * 37) % 10_000).into(),
                        format!("{} Market Street", 10 + i).into(),
                        "11:00 - 21:00".into(),
                        description.into(),
                        category_ids[slot].into(),
                        now.into(),
                        now.into(),
                    ])
                    .to_owned(),
            )
            .await?;

            if i % 3 == 0 {
                link(db, Favorites::Table, user_id, restaurant_id, now).await?;
            }
            if i % 4 == 0 {
                link(db, Likes::Table, user_id, restaurant_id, now).await?;
            }
            if i < 5 {
                insert_row(
                    db,
                    Query::insert()
                        .into_table(Comments::Table)
                        .columns([
                            Comments::Text,
                            Comments::UserId,
                            Comments::RestaurantId,
                            Comments::CreatedAt,
                            Comments::UpdatedAt,
                        ])
                        .values_panic([
                            "Great food, will come back.".into(),
                            user_id.into(),
                            restaurant_id.into(),
                            now.into(),
                            now.into(),
                        ])
                        .to_owned(),
                )
                .await?;
            }
        }

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Only the demo account's rows are removed; cascades take its links.
        manager
            .exec_stmt(
                Query::delete()
                    .from_table(Users::Table)
                    .and_where(Expr::col(Users::Email).eq("demo@example.com"))
                    .to_owned(),
            )
            .await
    }
}

fn count_rows<T>(table: T) -> SelectStatement
where
    T: Iden + 'static,
{
    Query::select()
        .expr_as(Func::count(Expr::col(Asterisk)), Alias::new("count"))
        .from(table)
        .to_owned()
}

async fn row_count<C: ConnectionTrait>(db: &C, stmt: SelectStatement) -> Result<i64, DbErr> {
    let row = db.query_one(db.get_database_backend().build(&stmt)).await?;
    match row {
        Some(row) => row.try_get::<i64>("", "count"),
        None => Ok(0),
    }
}

async fn insert_row<C: ConnectionTrait>(db: &C, stmt: InsertStatement) -> Result<i32, DbErr> {
    let result = db.execute(db.get_database_backend().build(&stmt)).await?;
    <i32 as TryFrom<u64>>::try_from(result.last_insert_id())
        .map_err(|_| DbErr::Custom("Seed row id out of range".to_string()))
}

async fn link<T>(
    db: &impl ConnectionTrait,
    table: T,
    user_id: i32,
    restaurant_id: i32,
    now: chrono::DateTime<Utc>,
) -> Result<(), DbErr>
where
    T: Iden + Send + 'static,
{
    let stmt = Query::insert()
        .into_table(table)
        .columns([
            Alias::new("user_id"),
            Alias::new("restaurant_id"),
            Alias::new("created_at"),
        ])
        .values_panic([user_id.into(), restaurant_id.into(), now.into()])
        .to_owned();
    insert_row(db, stmt).await.map(|_| ())
}
