use std::sync::Arc;

use tracing::{info, instrument, warn};

use super::domain::{NewSeller, Seller, SellerLogin, SellerRow};
use super::registry::BusinessRegistryClient;
use super::repository::SellerRepository;
use crate::errors::ServiceError;
use crate::password::{hash_password, validate_password, verify_password};

pub const MIN_PASSWORD_LEN: usize = 8;

/// Seller business service independent of web framework
pub struct SellerService<R: SellerRepository> {
    repo: Arc<R>,
    registry: BusinessRegistryClient,
    verify_on_register: bool,
}

impl<R: SellerRepository> SellerService<R> {
    pub fn new(repo: Arc<R>, registry: BusinessRegistryClient, verify_on_register: bool) -> Self {
        Self { repo, registry, verify_on_register }
    }

    /// Register a seller with a hashed password.
    ///
    /// When `verify_on_register` is set the business number is looked up
    /// first; the outcome is only logged.
    #[instrument(skip(self, input), fields(seller_id = %input.seller_id))]
    pub async fn save(&self, input: NewSeller) -> Result<Seller, ServiceError> {
        validate_password(&input.password, MIN_PASSWORD_LEN)?;
        if input.master_name.trim().is_empty() {
            return Err(ServiceError::Validation("master name required".into()));
        }

        if self.verify_on_register {
            match self.registry.lookup(&input.master_name, &input.seller_num).await {
                Ok(body) => info!(response_bytes = body.len(), "business number looked up"),
                Err(e) => warn!(error = %e, "business number lookup failed; registering anyway"),
            }
        }

        let password_hash = hash_password(&input.password)?;
        let seller = self
            .repo
            .insert(SellerRow {
                seller_id: input.seller_id.trim().to_string(),
                password_hash,
                master_name: input.master_name.trim().to_string(),
                seller_num: input.seller_num,
                email: input.email.trim().to_string(),
            })
            .await?;
        info!(seller_id = %seller.seller_id, "seller_registered");
        Ok(seller)
    }

    pub async fn find_by_id(&self, seller_id: &str) -> Result<Option<Seller>, ServiceError> {
        Ok(self.repo.find_by_id(seller_id).await?.map(|r| r.seller))
    }

    /// Raw registry response for the given owner and business number.
    pub async fn verify_business(&self, master_name: &str, seller_num: &str) -> Result<String, ServiceError> {
        if master_name.trim().is_empty() || seller_num.trim().is_empty() {
            return Err(ServiceError::Validation("masterName and sellerNum are required".into()));
        }
        self.registry.lookup(master_name.trim(), seller_num.trim()).await
    }

    #[instrument(skip(self, input), fields(seller_id = %input.seller_id))]
    pub async fn login(&self, input: SellerLogin) -> Result<Seller, ServiceError> {
        let record = self.repo.find_by_id(input.seller_id.trim()).await?.ok_or(ServiceError::Unauthorized)?;
        if !verify_password(&input.password, &record.password_hash)? {
            warn!("seller password mismatch");
            return Err(ServiceError::Unauthorized);
        }
        info!("seller_logged_in");
        Ok(record.seller)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::seller::repository::mock::MockSellerRepository;
    use crate::seller::SeaOrmSellerRepository;
    use crate::test_support::get_db;

    fn offline_registry() -> BusinessRegistryClient {
        BusinessRegistryClient::new(reqwest::Client::new(), "http://127.0.0.1:9/api/fapi", "k")
    }

    fn new_seller(id: &str) -> NewSeller {
        NewSeller {
            seller_id: id.into(),
            password: "Passw0rd!".into(),
            master_name: "홍길동".into(),
            seller_num: "123-45-67890".into(),
            email: "owner@example.com".into(),
        }
    }

    #[tokio::test]
    async fn register_then_login() {
        let svc = SellerService::new(Arc::new(MockSellerRepository::default()), offline_registry(), false);
        let seller = svc.save(new_seller("selr1")).await.unwrap();
        assert_eq!(seller.seller_num, "1234567890");

        let ok = svc.login(SellerLogin { seller_id: "selr1".into(), password: "Passw0rd!".into() }).await.unwrap();
        assert_eq!(ok.master_name, "홍길동");

        let bad = svc.login(SellerLogin { seller_id: "selr1".into(), password: "nope".into() }).await;
        assert!(matches!(bad, Err(ServiceError::Unauthorized)));
        let missing = svc.login(SellerLogin { seller_id: "ghost".into(), password: "Passw0rd!".into() }).await;
        assert!(matches!(missing, Err(ServiceError::Unauthorized)));
    }

    #[tokio::test]
    async fn duplicate_and_invalid_registrations_fail() {
        let svc = SellerService::new(Arc::new(MockSellerRepository::default()), offline_registry(), false);
        svc.save(new_seller("selr1")).await.unwrap();
        assert!(matches!(svc.save(new_seller("selr1")).await, Err(ServiceError::Conflict(_))));

        let mut short = new_seller("selr2");
        short.password = "123".into();
        assert!(matches!(svc.save(short).await, Err(ServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn failed_lookup_does_not_block_registration() {
        let svc = SellerService::new(Arc::new(MockSellerRepository::default()), offline_registry(), true);
        assert!(svc.save(new_seller("selr1")).await.is_ok());
        assert!(matches!(svc.verify_business("홍길동", "1234567890").await, Err(ServiceError::Upstream(_))));
        assert!(matches!(svc.verify_business(" ", "1").await, Err(ServiceError::Validation(_))));
    }

    #[tokio::test]
    async fn find_by_id_on_database() -> anyhow::Result<()> {
        let db = get_db().await?;
        let svc = SellerService::new(Arc::new(SeaOrmSellerRepository::new(db)), offline_registry(), false);
        assert_eq!(svc.find_by_id("selr1").await?, None);

        svc.save(new_seller("selr1")).await?;
        let found = svc.find_by_id("selr1").await?.expect("seller");
        assert_eq!(found.email, "owner@example.com");
        assert!(matches!(svc.save(new_seller("selr1")).await, Err(ServiceError::Conflict(_))));
        Ok(())
    }
}
