use models::{image, store};
use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, TransactionTrait,
};

use super::domain::{StoreRecord, StoreRow, StoreView};
use super::repository::StoreRepository;
use crate::errors::ServiceError;
use crate::pagination::PageRequest;

pub struct SeaOrmStoreRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmStoreRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

fn view_of((s, img): (store::Model, Option<image::Model>)) -> StoreView {
    StoreView::from_parts(s, img.map(|i| i.url).unwrap_or_default())
}

#[async_trait::async_trait]
impl StoreRepository for SeaOrmStoreRepository {
    async fn find_by_name(&self, name: &str) -> Result<Option<StoreRecord>, ServiceError> {
        let found = store::Entity::find()
            .filter(store::Column::Name.eq(name))
            .find_also_related(image::Entity)
            .one(&self.db)
            .await?;
        Ok(found.map(|(s, img)| {
            let password_hash = s.password_hash.clone();
            StoreRecord { store: view_of((s, img)), password_hash }
        }))
    }

    async fn find_by_id(&self, store_id: i32) -> Result<Option<StoreView>, ServiceError> {
        let found = store::Entity::find_by_id(store_id)
            .find_also_related(image::Entity)
            .one(&self.db)
            .await?;
        Ok(found.map(view_of))
    }

    async fn find_by_seller(&self, seller_id: &str, page: PageRequest) -> Result<(Vec<StoreView>, u64), ServiceError> {
        let paginator = store::Entity::find()
            .filter(store::Column::SellerId.eq(seller_id))
            .order_by_asc(store::Column::Id)
            .find_also_related(image::Entity)
            .paginate(&self.db, page.size);
        let total = paginator.num_items().await?;
        let rows = paginator.fetch_page(page.page).await?;
        Ok((rows.into_iter().map(view_of).collect(), total))
    }

    async fn insert(&self, row: StoreRow) -> Result<StoreView, ServiceError> {
        if self.find_by_name(row.name.trim()).await?.is_some() {
            return Err(ServiceError::Conflict(format!("store name {} is taken", row.name.trim())));
        }
        let txn = self.db.begin().await?;
        let img = image::create(&txn, &row.image_url).await?;
        let created = store::create(
            &txn,
            store::NewStoreRow {
                name: row.name,
                password_hash: row.password_hash,
                conv_x: row.conv_x,
                conv_y: row.conv_y,
                address: row.address,
                category: row.category,
                seller_id: row.seller_id,
                image_id: img.id,
            },
        )
        .await?;
        txn.commit().await?;
        Ok(StoreView::from_parts(created, img.url))
    }
}
