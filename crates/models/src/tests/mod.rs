/// Schema built by the migrator on SQLite
pub mod migration_tests;

/// CRUD and relation tests for seller/store/menu/image
pub mod crud_tests;

use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use migration::MigratorTrait;

/// Fresh in-memory SQLite database with all migrations applied.
pub(crate) async fn setup_test_db() -> anyhow::Result<DatabaseConnection> {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}
