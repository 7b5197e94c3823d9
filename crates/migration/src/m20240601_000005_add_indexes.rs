use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Store: paged listing by seller
        manager
            .create_index(
                Index::create()
                    .name("idx_store_seller")
                    .table(Store::Table)
                    .col(Store::SellerId)
                    .to_owned(),
            )
            .await?;

        // Store: bounding-box prefilter for radius search
        manager
            .create_index(
                Index::create()
                    .name("idx_store_coords")
                    .table(Store::Table)
                    .col(Store::ConvY)
                    .col(Store::ConvX)
                    .to_owned(),
            )
            .await?;

        // Menu: listing by store
        manager
            .create_index(
                Index::create()
                    .name("idx_menu_store")
                    .table(Menu::Table)
                    .col(Menu::StoreId)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_index(Index::drop().name("idx_menu_store").table(Menu::Table).to_owned()).await?;
        manager.drop_index(Index::drop().name("idx_store_coords").table(Store::Table).to_owned()).await?;
        manager.drop_index(Index::drop().name("idx_store_seller").table(Store::Table).to_owned()).await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Store { Table, SellerId, ConvX, ConvY }

#[derive(DeriveIden)]
enum Menu { Table, StoreId }
