#![cfg(test)]
//! Database fixtures shared by the service tests.

use migration::MigratorTrait;
use models::{image, seller, store, FoodCategory};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

/// Fresh in-memory SQLite database with every migration applied.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

/// Migrated PostgreSQL connection when `DATABASE_URL` points at one, else `None`.
pub async fn postgres_db() -> Option<DatabaseConnection> {
    std::env::var("DATABASE_URL").ok().filter(|u| u.starts_with("postgres"))?;
    let db = models::db::connect().await.ok()?;
    migration::Migrator::up(&db, None).await.ok()?;
    Some(db)
}

pub async fn seed_seller(db: &DatabaseConnection, id: &str) -> anyhow::Result<seller::Model> {
    Ok(seller::create(db, id, "hash".into(), "홍길동", "123-45-67890", "owner@example.com").await?)
}

/// Store at (`lon`, `lat`) with a throwaway image row.
pub async fn seed_store(db: &DatabaseConnection, seller_id: &str, name: &str, lon: f64, lat: f64) -> anyhow::Result<store::Model> {
    let img = image::create(db, "https://cdn.example.com/store/x.png").await?;
    Ok(store::create(db, store::NewStoreRow {
        name: name.into(),
        password_hash: "hash".into(),
        conv_x: lon,
        conv_y: lat,
        address: None,
        category: FoodCategory::Korean,
        seller_id: seller_id.into(),
        image_id: img.id,
    })
    .await?)
}
