//! Create `menu` table with FKs to `store` and `image`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Menu::Table)
                    .if_not_exists()
                    .col(pk_auto(Menu::Id))
                    .col(string_len(Menu::Name, 128).not_null())
                    .col(integer(Menu::Price).not_null())
                    .col(text_null(Menu::Description))
                    .col(string_len(Menu::Category, 32).not_null())
                    .col(integer(Menu::StoreId).not_null())
                    .col(integer(Menu::ImageId).not_null())
                    .col(timestamp_with_time_zone(Menu::CreatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_menu_store")
                            .from(Menu::Table, Menu::StoreId)
                            .to(Store::Table, Store::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_menu_image")
                            .from(Menu::Table, Menu::ImageId)
                            .to(Image::Table, Image::Id)
                            .on_delete(ForeignKeyAction::Restrict)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Menu::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Menu { Table, Id, Name, Price, Description, Category, StoreId, ImageId, CreatedAt }

#[derive(DeriveIden)]
enum Store { Table, Id }

#[derive(DeriveIden)]
enum Image { Table, Id }
