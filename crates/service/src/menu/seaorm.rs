use models::{image, menu, store};
use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, TransactionTrait};

use super::domain::{MenuView, NewMenu};
use super::repository::MenuRepository;
use crate::errors::ServiceError;

pub struct SeaOrmMenuRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmMenuRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait::async_trait]
impl MenuRepository for SeaOrmMenuRepository {
    async fn find_by_store(&self, store_id: i32) -> Result<Vec<MenuView>, ServiceError> {
        let rows = menu::Entity::find()
            .filter(menu::Column::StoreId.eq(store_id))
            .order_by_asc(menu::Column::Id)
            .find_also_related(image::Entity)
            .all(&self.db)
            .await?;
        Ok(rows
            .into_iter()
            .map(|(m, img)| MenuView::from_parts(m, img.map(|i| i.url).unwrap_or_default()))
            .collect())
    }

    async fn insert(&self, input: NewMenu) -> Result<MenuView, ServiceError> {
        let txn = self.db.begin().await?;
        if store::Entity::find_by_id(input.store_id).one(&txn).await?.is_none() {
            return Err(ServiceError::not_found("store"));
        }
        let img = image::create(&txn, &input.image_url).await?;
        let created = menu::create(
            &txn,
            menu::NewMenuRow {
                name: input.name,
                price: input.price,
                description: input.description,
                category: input.category,
                store_id: input.store_id,
                image_id: img.id,
            },
        )
        .await?;
        txn.commit().await?;
        Ok(MenuView::from_parts(created, img.url))
    }
}
