//! Create `store` table with FKs to `seller` and `image`.
//!
//! `conv_x` is the longitude, `conv_y` the latitude.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Store::Table)
                    .if_not_exists()
                    .col(pk_auto(Store::Id))
                    .col(string_len(Store::Name, 128).unique_key().not_null())
                    .col(string_len(Store::PasswordHash, 255).not_null())
                    .col(double(Store::ConvX).not_null())
                    .col(double(Store::ConvY).not_null())
                    .col(string_len_null(Store::Address, 255))
                    .col(string_len(Store::Category, 32).not_null())
                    .col(string_len(Store::SellerId, 64).not_null())
                    .col(integer(Store::ImageId).not_null())
                    .col(timestamp_with_time_zone(Store::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_store_seller")
                            .from(Store::Table, Store::SellerId)
                            .to(Seller::Table, Seller::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_store_image")
                            .from(Store::Table, Store::ImageId)
                            .to(Image::Table, Image::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Store::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Store { Table, Id, Name, PasswordHash, ConvX, ConvY, Address, Category, SellerId, ImageId, CreatedAt }

#[derive(DeriveIden)]
enum Seller { Table, Id }

#[derive(DeriveIden)]
enum Image { Table, Id }
