use models::FoodCategory;
use serde::{Deserialize, Serialize};

/// A store to create. The image URL is already decided (uploaded or default).
#[derive(Debug, Clone)]
pub struct NewStore {
    pub name: String,
    pub password: String,
    pub conv_x: f64,
    pub conv_y: f64,
    pub address: Option<String>,
    pub category: FoodCategory,
    pub seller_id: String,
    pub image_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreLogin {
    pub name: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StoreView {
    pub id: i32,
    pub name: String,
    pub conv_x: f64,
    pub conv_y: f64,
    pub address: Option<String>,
    pub category: FoodCategory,
    pub category_label: &'static str,
    pub seller_id: String,
    pub image_url: String,
}

impl StoreView {
    pub fn from_parts(store: models::store::Model, image_url: String) -> Self {
        Self {
            id: store.id,
            name: store.name,
            conv_x: store.conv_x,
            conv_y: store.conv_y,
            address: store.address,
            category: store.category,
            category_label: store.category.label(),
            seller_id: store.seller_id,
            image_url,
        }
    }
}

/// Insert payload for the repository, password already hashed.
#[derive(Debug, Clone)]
pub struct StoreRow {
    pub name: String,
    pub password_hash: String,
    pub conv_x: f64,
    pub conv_y: f64,
    pub address: Option<String>,
    pub category: FoodCategory,
    pub seller_id: String,
    pub image_url: String,
}

#[derive(Debug, Clone)]
pub struct StoreRecord {
    pub store: StoreView,
    pub password_hash: String,
}
