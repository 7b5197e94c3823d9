use async_trait::async_trait;

use super::domain::{StoreRecord, StoreRow, StoreView};
use crate::errors::ServiceError;
use crate::pagination::PageRequest;

#[async_trait]
pub trait StoreRepository: Send + Sync {
    async fn find_by_name(&self, name: &str) -> Result<Option<StoreRecord>, ServiceError>;
    async fn find_by_id(&self, store_id: i32) -> Result<Option<StoreView>, ServiceError>;
    /// One page of the seller's stores ordered by id, plus the seller's total store count.
    async fn find_by_seller(&self, seller_id: &str, page: PageRequest) -> Result<(Vec<StoreView>, u64), ServiceError>;
    /// Inserts the image row and the store row together. `Conflict` when the name is taken.
    async fn insert(&self, row: StoreRow) -> Result<StoreView, ServiceError>;
}

/// In-memory repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockStoreRepository {
        stores: Mutex<Vec<StoreRecord>>,
    }

    #[async_trait]
    impl StoreRepository for MockStoreRepository {
        async fn find_by_name(&self, name: &str) -> Result<Option<StoreRecord>, ServiceError> {
            Ok(self.stores.lock().unwrap().iter().find(|r| r.store.name == name).cloned())
        }

        async fn find_by_id(&self, store_id: i32) -> Result<Option<StoreView>, ServiceError> {
            Ok(self.stores.lock().unwrap().iter().find(|r| r.store.id == store_id).map(|r| r.store.clone()))
        }

        async fn find_by_seller(&self, seller_id: &str, page: PageRequest) -> Result<(Vec<StoreView>, u64), ServiceError> {
            let stores = self.stores.lock().unwrap();
            let owned: Vec<&StoreRecord> = stores.iter().filter(|r| r.store.seller_id == seller_id).collect();
            let content = owned
                .iter()
                .skip((page.page * page.size) as usize)
                .take(page.size as usize)
                .map(|r| r.store.clone())
                .collect();
            Ok((content, owned.len() as u64))
        }

        async fn insert(&self, row: StoreRow) -> Result<StoreView, ServiceError> {
            models::store::validate_name(&row.name)?;
            models::store::validate_coordinates(row.conv_x, row.conv_y)?;
            let mut stores = self.stores.lock().unwrap();
            if stores.iter().any(|r| r.store.name == row.name) {
                return Err(ServiceError::Conflict(format!("store name {} is taken", row.name)));
            }
            let view = StoreView {
                id: stores.len() as i32 + 1,
                name: row.name,
                conv_x: row.conv_x,
                conv_y: row.conv_y,
                address: row.address,
                category: row.category,
                category_label: row.category.label(),
                seller_id: row.seller_id,
                image_url: row.image_url,
            };
            stores.push(StoreRecord { store: view.clone(), password_hash: row.password_hash });
            Ok(view)
        }
    }
}
