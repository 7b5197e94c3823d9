use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors;
use crate::{image, menu, seller, FoodCategory};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "store")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    /// Longitude
    pub conv_x: f64,
    /// Latitude
    pub conv_y: f64,
    pub address: Option<String>,
    pub category: FoodCategory,
    pub seller_id: String,
    pub image_id: i32,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Seller,
    Image,
    Menu,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Seller => Entity::belongs_to(seller::Entity).from(Column::SellerId).to(seller::Column::Id).into(),
            Relation::Image => Entity::belongs_to(image::Entity).from(Column::ImageId).to(image::Column::Id).into(),
            Relation::Menu => Entity::has_many(menu::Entity).into(),
        }
    }
}

impl Related<seller::Entity> for Entity {
    fn to() -> RelationDef { Relation::Seller.def() }
}

impl Related<image::Entity> for Entity {
    fn to() -> RelationDef { Relation::Image.def() }
}

impl Related<menu::Entity> for Entity {
    fn to() -> RelationDef { Relation::Menu.def() }
}

impl ActiveModelBehavior for ActiveModel {}

/// Columns of a new store row, password already hashed.
#[derive(Clone, Debug)]
pub struct NewStoreRow {
    pub name: String,
    pub password_hash: String,
    pub conv_x: f64,
    pub conv_y: f64,
    pub address: Option<String>,
    pub category: FoodCategory,
    pub seller_id: String,
    pub image_id: i32,
}

pub fn validate_name(name: &str) -> Result<(), errors::ModelError> {
    let name = name.trim();
    if name.is_empty() { return Err(errors::ModelError::Validation("store name required".into())); }
    if name.chars().count() > 128 { return Err(errors::ModelError::Validation("store name too long (<=128)".into())); }
    Ok(())
}

pub fn validate_coordinates(conv_x: f64, conv_y: f64) -> Result<(), errors::ModelError> {
    if !(-180.0..=180.0).contains(&conv_x) {
        return Err(errors::ModelError::Validation("convX (longitude) must be within -180..=180".into()));
    }
    if !(-90.0..=90.0).contains(&conv_y) {
        return Err(errors::ModelError::Validation("convY (latitude) must be within -90..=90".into()));
    }
    Ok(())
}

pub async fn create<C: ConnectionTrait>(db: &C, row: NewStoreRow) -> Result<Model, errors::ModelError> {
    validate_name(&row.name)?;
    validate_coordinates(row.conv_x, row.conv_y)?;
    let am = ActiveModel {
        name: Set(row.name.trim().to_string()),
        password_hash: Set(row.password_hash),
        conv_x: Set(row.conv_x),
        conv_y: Set(row.conv_y),
        address: Set(row.address.filter(|a| !a.trim().is_empty())),
        category: Set(row.category),
        seller_id: Set(row.seller_id),
        image_id: Set(row.image_id),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}
