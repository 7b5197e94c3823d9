use serde::{Deserialize, Serialize};

/// Registration form
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSeller {
    pub seller_id: String,
    pub password: String,
    pub master_name: String,
    /// Business registration number, dashes allowed
    pub seller_num: String,
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SellerLogin {
    pub seller_id: String,
    pub password: String,
}

/// Seller as exposed to callers; never carries the password hash.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Seller {
    pub seller_id: String,
    pub master_name: String,
    pub seller_num: String,
    pub email: String,
}

/// Row handed to the repository, password already hashed.
#[derive(Debug, Clone)]
pub struct SellerRow {
    pub seller_id: String,
    pub password_hash: String,
    pub master_name: String,
    pub seller_num: String,
    pub email: String,
}

/// Stored seller with its hash, for login.
#[derive(Debug, Clone)]
pub struct SellerRecord {
    pub seller: Seller,
    pub password_hash: String,
}

impl From<models::seller::Model> for SellerRecord {
    fn from(m: models::seller::Model) -> Self {
        Self {
            seller: Seller { seller_id: m.id, master_name: m.master_name, seller_num: m.seller_num, email: m.email },
            password_hash: m.password_hash,
        }
    }
}
