use sea_orm::{DatabaseConnection, EntityTrait};

use super::domain::{Seller, SellerRecord, SellerRow};
use super::repository::SellerRepository;
use crate::errors::ServiceError;

pub struct SeaOrmSellerRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmSellerRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait::async_trait]
impl SellerRepository for SeaOrmSellerRepository {
    async fn find_by_id(&self, seller_id: &str) -> Result<Option<SellerRecord>, ServiceError> {
        let found = models::seller::Entity::find_by_id(seller_id.to_string()).one(&self.db).await?;
        Ok(found.map(SellerRecord::from))
    }

    async fn insert(&self, row: SellerRow) -> Result<Seller, ServiceError> {
        if self.find_by_id(&row.seller_id).await?.is_some() {
            return Err(ServiceError::Conflict(format!("seller id {} is taken", row.seller_id)));
        }
        let created = models::seller::create(
            &self.db,
            &row.seller_id,
            row.password_hash,
            &row.master_name,
            &row.seller_num,
            &row.email,
        )
        .await?;
        Ok(SellerRecord::from(created).seller)
    }
}
