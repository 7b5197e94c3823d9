use models::FoodCategory;
use serde::Serialize;

/// A menu item to create; `image_url` is the uploaded or default image.
#[derive(Debug, Clone)]
pub struct NewMenu {
    pub name: String,
    pub price: i32,
    pub description: Option<String>,
    pub category: FoodCategory,
    pub store_id: i32,
    pub image_url: String,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MenuView {
    pub id: i32,
    pub name: String,
    pub price: i32,
    pub description: Option<String>,
    pub category: FoodCategory,
    pub category_label: &'static str,
    pub store_id: i32,
    pub image_url: String,
}

impl MenuView {
    pub fn from_parts(menu: models::menu::Model, image_url: String) -> Self {
        Self {
            id: menu.id,
            name: menu.name,
            price: menu.price,
            description: menu.description,
            category: menu.category,
            category_label: menu.category.label(),
            store_id: menu.store_id,
            image_url,
        }
    }
}
