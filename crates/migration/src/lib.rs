//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied after the tables; the PostGIS column comes last.
pub use sea_orm_migration::prelude::*;

mod m20240601_000001_create_seller;
mod m20240601_000002_create_image;
mod m20240601_000003_create_store;
mod m20240601_000004_create_menu;
mod m20240601_000005_add_indexes;
mod m20240601_000006_add_store_location;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_seller::Migration),
            Box::new(m20240601_000002_create_image::Migration),
            Box::new(m20240601_000003_create_store::Migration),
            Box::new(m20240601_000004_create_menu::Migration),
            Box::new(m20240601_000005_add_indexes::Migration),
            Box::new(m20240601_000006_add_store_location::Migration),
        ]
    }
}
