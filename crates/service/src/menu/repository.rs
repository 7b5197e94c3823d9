use async_trait::async_trait;

use super::domain::{MenuView, NewMenu};
use crate::errors::ServiceError;

#[async_trait]
pub trait MenuRepository: Send + Sync {
    /// All menus of the store ordered by id.
    async fn find_by_store(&self, store_id: i32) -> Result<Vec<MenuView>, ServiceError>;
    /// Inserts the image row and the menu row together; `NotFound` for an unknown store.
    async fn insert(&self, menu: NewMenu) -> Result<MenuView, ServiceError>;
}

/// In-memory repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockMenuRepository {
        stores: HashSet<i32>,
        menus: Mutex<Vec<MenuView>>,
    }

    impl MockMenuRepository {
        pub fn with_stores(ids: &[i32]) -> Self {
            Self { stores: ids.iter().copied().collect(), menus: Mutex::default() }
        }
    }

    #[async_trait]
    impl MenuRepository for MockMenuRepository {
        async fn find_by_store(&self, store_id: i32) -> Result<Vec<MenuView>, ServiceError> {
            Ok(self.menus.lock().unwrap().iter().filter(|m| m.store_id == store_id).cloned().collect())
        }

        async fn insert(&self, menu: NewMenu) -> Result<MenuView, ServiceError> {
            if !self.stores.contains(&menu.store_id) {
                return Err(ServiceError::not_found("store"));
            }
            models::menu::validate(&menu.name, menu.price)?;
            let mut menus = self.menus.lock().unwrap();
            let view = MenuView {
                id: menus.len() as i32 + 1,
                name: menu.name,
                price: menu.price,
                description: menu.description,
                category: menu.category,
                category_label: menu.category.label(),
                store_id: menu.store_id,
                image_url: menu.image_url,
            };
            menus.push(view.clone());
            Ok(view)
        }
    }
}
