//! Create `seller` table.
//!
//! Business owners; the string `id` is the login id.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Seller::Table)
                    .if_not_exists()
                    .col(string_len(Seller::Id, 64).primary_key())
                    .col(string_len(Seller::PasswordHash, 255).not_null())
                    .col(string_len(Seller::MasterName, 64).not_null())
                    .col(string_len(Seller::SellerNum, 32).not_null())
                    .col(string_len(Seller::Email, 255).not_null())
                    .col(timestamp_with_time_zone(Seller::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Seller::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Seller { Table, Id, PasswordHash, MasterName, SellerNum, Email, CreatedAt }
