use async_trait::async_trait;

use super::domain::{Seller, SellerRecord, SellerRow};
use crate::errors::ServiceError;

#[async_trait]
pub trait SellerRepository: Send + Sync {
    async fn find_by_id(&self, seller_id: &str) -> Result<Option<SellerRecord>, ServiceError>;
    /// Fails with `Conflict` when the id is taken.
    async fn insert(&self, row: SellerRow) -> Result<Seller, ServiceError>;
}

/// In-memory repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashMap;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockSellerRepository {
        sellers: Mutex<HashMap<String, SellerRecord>>,
    }

    #[async_trait]
    impl SellerRepository for MockSellerRepository {
        async fn find_by_id(&self, seller_id: &str) -> Result<Option<SellerRecord>, ServiceError> {
            Ok(self.sellers.lock().unwrap().get(seller_id).cloned())
        }

        async fn insert(&self, row: SellerRow) -> Result<Seller, ServiceError> {
            models::seller::validate_seller_id(&row.seller_id)?;
            models::seller::validate_email(&row.email)?;
            let seller_num = models::seller::normalize_seller_num(&row.seller_num)?;
            let mut sellers = self.sellers.lock().unwrap();
            if sellers.contains_key(&row.seller_id) {
                return Err(ServiceError::Conflict(format!("seller id {} is taken", row.seller_id)));
            }
            let seller = Seller { seller_id: row.seller_id.clone(), master_name: row.master_name, seller_num, email: row.email };
            sellers.insert(row.seller_id, SellerRecord { seller: seller.clone(), password_hash: row.password_hash });
            Ok(seller)
        }
    }
}
