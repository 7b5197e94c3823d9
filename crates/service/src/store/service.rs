use std::sync::Arc;

use models::store;
use tracing::{info, instrument, warn};

use super::domain::{NewStore, StoreRow, StoreView};
use super::repository::StoreRepository;
use crate::errors::ServiceError;
use crate::pagination::{Page, PageRequest};
use crate::password::{hash_password, validate_password, verify_password};

pub const MIN_STORE_PASSWORD_LEN: usize = 4;

pub struct StoreService<R: StoreRepository> {
    repo: Arc<R>,
}

impl<R: StoreRepository> StoreService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Page `page` (0-based) of the seller's stores, `page_size` per page.
    #[instrument(skip(self))]
    pub async fn get_stores_by_seller_id(&self, seller_id: &str, page: u64, page_size: u64) -> Result<Page<StoreView>, ServiceError> {
        let req = PageRequest::new(page, page_size);
        let (content, total) = self.repo.find_by_seller(seller_id, req).await?;
        Ok(Page::new(content, total, req))
    }

    /// `Some(store)` only when the name exists and the password matches its hash.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::store::{domain::NewStore, repository::mock::MockStoreRepository, StoreService};
    /// let svc = StoreService::new(Arc::new(MockStoreRepository::default()));
    /// let input = NewStore {
    ///     name: "Cafe A".into(), password: "1234".into(), conv_x: 127.0, conv_y: 37.5, address: None,
    ///     category: models::FoodCategory::Cafe, seller_id: "selr1".into(), image_url: "https://cdn.example.com/a.png".into(),
    /// };
    /// tokio_test::block_on(svc.save(input)).unwrap();
    /// assert!(tokio_test::block_on(svc.login_store("Cafe A", "1234")).unwrap().is_some());
    /// assert!(tokio_test::block_on(svc.login_store("Cafe A", "4321")).unwrap().is_none());
    /// ```
    #[instrument(skip(self, password))]
    pub async fn login_store(&self, name: &str, password: &str) -> Result<Option<StoreView>, ServiceError> {
        let Some(record) = self.repo.find_by_name(name).await? else {
            return Ok(None);
        };
        if !verify_password(password, &record.password_hash)? {
            warn!(store_id = record.store.id, "store password mismatch");
            return Ok(None);
        }
        info!(store_id = record.store.id, "store_logged_in");
        Ok(Some(record.store))
    }

    /// Everything `save` would reject short of a database failure, so callers
    /// can refuse a form before storing its image.
    pub async fn check_new(&self, input: &NewStore) -> Result<(), ServiceError> {
        validate_password(&input.password, MIN_STORE_PASSWORD_LEN)?;
        store::validate_name(&input.name)?;
        store::validate_coordinates(input.conv_x, input.conv_y)?;
        if self.repo.find_by_name(input.name.trim()).await?.is_some() {
            return Err(ServiceError::Conflict(format!("store name {} already taken", input.name.trim())));
        }
        Ok(())
    }

    #[instrument(skip(self, input), fields(name = %input.name, seller_id = %input.seller_id))]
    pub async fn save(&self, input: NewStore) -> Result<StoreView, ServiceError> {
        self.check_new(&input).await?;
        let password_hash = hash_password(&input.password)?;
        let store = self
            .repo
            .insert(StoreRow {
                name: input.name.trim().to_string(),
                password_hash,
                conv_x: input.conv_x,
                conv_y: input.conv_y,
                address: input.address,
                category: input.category,
                seller_id: input.seller_id,
                image_url: input.image_url,
            })
            .await?;
        info!(store_id = store.id, image_url = %store.image_url, "store_created");
        Ok(store)
    }

    pub async fn find_by_id(&self, store_id: i32) -> Result<StoreView, ServiceError> {
        self.repo.find_by_id(store_id).await?.ok_or_else(|| ServiceError::not_found("store"))
    }
}
