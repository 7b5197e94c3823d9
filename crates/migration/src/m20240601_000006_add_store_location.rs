//! Add a PostGIS `location` column to `store`, generated from `conv_x`/`conv_y`,
//! with a GIST index.
//!
//! Only applied on PostgreSQL when the `postgis` extension is already
//! installed in the database; every other backend treats this as a no-op.
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{ConnectionTrait, DbBackend, Statement};

#[derive(DeriveMigrationName)]
pub struct Migration;

async fn postgis_installed(manager: &SchemaManager<'_>) -> Result<bool, DbErr> {
    if manager.get_database_backend() != DbBackend::Postgres {
        return Ok(false);
    }
    let row = manager
        .get_connection()
        .query_one(Statement::from_string(
            DbBackend::Postgres,
            "SELECT 1 AS present FROM pg_extension WHERE extname = 'postgis'",
        ))
        .await?;
    Ok(row.is_some())
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        if !postgis_installed(manager).await? {
            return Ok(());
        }
        let conn = manager.get_connection();
        conn.execute_unprepared(
            "ALTER TABLE store ADD COLUMN IF NOT EXISTS location geography(Point, 4326) \
             GENERATED ALWAYS AS (ST_SetSRID(ST_MakePoint(conv_x, conv_y), 4326)::geography) STORED",
        )
        .await?;
        conn.execute_unprepared("CREATE INDEX IF NOT EXISTS idx_store_location ON store USING GIST (location)")
            .await?;
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        if manager.get_database_backend() != DbBackend::Postgres {
            return Ok(());
        }
        let conn = manager.get_connection();
        conn.execute_unprepared("DROP INDEX IF EXISTS idx_store_location").await?;
        conn.execute_unprepared("ALTER TABLE store DROP COLUMN IF EXISTS location").await?;
        Ok(())
    }
}
