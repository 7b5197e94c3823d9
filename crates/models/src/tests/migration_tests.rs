use migration::MigratorTrait;
use sea_orm::{ConnectionTrait, DatabaseBackend, Statement, Value};
use anyhow::Result;

use super::setup_test_db;

#[tokio::test]
async fn migrations_create_all_tables() -> Result<()> {
    let db = setup_test_db().await?;
    for table in ["seller", "image", "store", "menu"] {
        let row = db
            .query_one(Statement::from_sql_and_values(
                DatabaseBackend::Sqlite,
                "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?",
                [Value::from(table)],
            ))
            .await?;
        assert!(row.is_some(), "missing table {table}");
    }
    Ok(())
}

#[tokio::test]
async fn migrations_roll_back_cleanly() -> Result<()> {
    let db = setup_test_db().await?;
    migration::Migrator::down(&db, None).await?;
    let row = db
        .query_one(Statement::from_string(
            DatabaseBackend::Sqlite,
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name = 'store'",
        ))
        .await?;
    assert!(row.is_none());
    Ok(())
}
