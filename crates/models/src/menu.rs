use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors;
use crate::{image, store, FoodCategory};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "menu")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    pub price: i32,
    pub description: Option<String>,
    pub category: FoodCategory,
    pub store_id: i32,
    pub image_id: i32,
    pub created_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Store,
    Image,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Store => Entity::belongs_to(store::Entity).from(Column::StoreId).to(store::Column::Id).into(),
            Relation::Image => Entity::belongs_to(image::Entity).from(Column::ImageId).to(image::Column::Id).into(),
        }
    }
}

impl Related<store::Entity> for Entity {
    fn to() -> RelationDef { Relation::Store.def() }
}

impl Related<image::Entity> for Entity {
    fn to() -> RelationDef { Relation::Image.def() }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Clone, Debug)]
pub struct NewMenuRow {
    pub name: String,
    pub price: i32,
    pub description: Option<String>,
    pub category: FoodCategory,
    pub store_id: i32,
    pub image_id: i32,
}

pub fn validate(name: &str, price: i32) -> Result<(), errors::ModelError> {
    if name.trim().is_empty() { return Err(errors::ModelError::Validation("menu name required".into())); }
    if price < 0 { return Err(errors::ModelError::Validation("price must be >= 0".into())); }
    Ok(())
}

pub async fn create<C: ConnectionTrait>(db: &C, row: NewMenuRow) -> Result<Model, errors::ModelError> {
    validate(&row.name, row.price)?;
    let am = ActiveModel {
        name: Set(row.name.trim().to_string()),
        price: Set(row.price),
        description: Set(row.description.filter(|d| !d.trim().is_empty())),
        category: Set(row.category),
        store_id: Set(row.store_id),
        image_id: Set(row.image_id),
        created_at: Set(Utc::now().into()),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| errors::ModelError::Db(e.to_string()))
}
