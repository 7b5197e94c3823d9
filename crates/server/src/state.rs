use std::sync::Arc;

use configs::{AppConfig, SessionConfig};
use sea_orm::DatabaseConnection;
use service::{
    geo::StoreRadiusSearch,
    menu::{MenuService, SeaOrmMenuRepository},
    seller::{BusinessRegistryClient, SeaOrmSellerRepository, SellerService},
    store::{SeaOrmStoreRepository, StoreService},
    upload::ImageUploader,
};

pub type Sellers = SellerService<SeaOrmSellerRepository>;
pub type Stores = StoreService<SeaOrmStoreRepository>;
pub type Menus = MenuService<SeaOrmMenuRepository>;

/// Everything a handler needs; cheap to clone per request.
#[derive(Clone)]
pub struct ServerState {
    pub db: DatabaseConnection,
    pub session: SessionConfig,
    pub sellers: Arc<Sellers>,
    pub stores: Arc<Stores>,
    pub menus: Arc<Menus>,
    pub uploader: Arc<dyn ImageUploader>,
    pub radius: Arc<dyn StoreRadiusSearch>,
    pub max_upload_bytes: usize,
}

impl ServerState {
    pub fn new(
        db: DatabaseConnection,
        cfg: &AppConfig,
        uploader: Arc<dyn ImageUploader>,
        radius: Arc<dyn StoreRadiusSearch>,
        registry: BusinessRegistryClient,
    ) -> Self {
        let sellers = SellerService::new(
            Arc::new(SeaOrmSellerRepository::new(db.clone())),
            registry,
            cfg.business_registry.verify_on_register,
        );
        Self {
            sellers: Arc::new(sellers),
            stores: Arc::new(StoreService::new(Arc::new(SeaOrmStoreRepository::new(db.clone())))),
            menus: Arc::new(MenuService::new(Arc::new(SeaOrmMenuRepository::new(db.clone())))),
            session: cfg.session.clone(),
            uploader,
            radius,
            max_upload_bytes: cfg.storage.max_upload_bytes,
            db,
        }
    }
}
