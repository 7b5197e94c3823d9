use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors;
use crate::store;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "seller")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub master_name: String,
    pub seller_num: String,
    pub email: String,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Store,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self { Relation::Store => Entity::has_many(store::Entity).into() }
    }
}

impl Related<store::Entity> for Entity {
    fn to() -> RelationDef { Relation::Store.def() }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate_seller_id(id: &str) -> Result<(), errors::ModelError> {
    let id = id.trim();
    if id.len() < 4 || id.len() > 64 {
        return Err(errors::ModelError::Validation("seller id must be 4..=64 characters".into()));
    }
    if !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-') {
        return Err(errors::ModelError::Validation("seller id may only contain letters, digits, '_' and '-'".into()));
    }
    Ok(())
}

/// Business registration numbers are ten digits, dashes allowed (`123-45-67890`).
pub fn normalize_seller_num(num: &str) -> Result<String, errors::ModelError> {
    let digits: String = num.chars().filter(|c| *c != '-').collect();
    if digits.len() != 10 || !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(errors::ModelError::Validation("business registration number must be 10 digits".into()));
    }
    Ok(digits)
}

pub fn validate_email(email: &str) -> Result<(), errors::ModelError> {
    if !email.contains('@') { return Err(errors::ModelError::Validation("invalid email".into())); }
    Ok(())
}

pub async fn create<C: ConnectionTrait>(
    db: &C,
    id: &str,
    password_hash: String,
    master_name: &str,
    seller_num: &str,
    email: &str,
) -> Result<Model, errors::ModelError> {
    validate_seller_id(id)?;
    validate_email(email)?;
    if master_name.trim().is_empty() { return Err(errors::ModelError::Validation("master name required".into())); }
    let seller_num = normalize_seller_num(seller_num)?;
    let am = ActiveModel {
        id: Set(id.trim().to_string()),
        password_hash: Set(password_hash),
        master_name: Set(master_name.trim().to_string()),
        seller_num: Set(seller_num),
        email: Set(email.trim().to_string()),
        created_at: Set(Utc::now().into()),
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}
