use std::sync::Arc;

use tracing::{info, instrument};

use super::domain::{MenuView, NewMenu};
use super::repository::MenuRepository;
use crate::errors::ServiceError;

pub struct MenuService<R: MenuRepository> {
    repo: Arc<R>,
}

impl<R: MenuRepository> MenuService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    pub async fn get_menus_by_store_id(&self, store_id: i32) -> Result<Vec<MenuView>, ServiceError> {
        self.repo.find_by_store(store_id).await
    }

    /// Field checks `save` applies, usable before the menu image is stored.
    pub fn check_new(&self, input: &NewMenu) -> Result<(), ServiceError> {
        models::menu::validate(&input.name, input.price)?;
        Ok(())
    }

    #[instrument(skip(self, input), fields(store_id = input.store_id, name = %input.name))]
    pub async fn save(&self, input: NewMenu) -> Result<MenuView, ServiceError> {
        self.check_new(&input)?;
        let menu = self.repo.insert(input).await?;
        info!(menu_id = menu.id, image_url = %menu.image_url, "menu_created");
        Ok(menu)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::repository::mock::MockMenuRepository;
    use crate::menu::SeaOrmMenuRepository;
    use crate::test_support::{get_db, seed_seller, seed_store};
    use crate::upload::DEFAULT_MENU_IMAGE;
    use models::FoodCategory;

    fn new_menu(name: &str, store_id: i32, image_url: &str) -> NewMenu {
        NewMenu {
            name: name.into(),
            price: 4500,
            description: Some("샷 추가 가능".into()),
            category: FoodCategory::Cafe,
            store_id,
            image_url: image_url.into(),
        }
    }

    #[tokio::test]
    async fn menus_are_scoped_to_their_store() -> anyhow::Result<()> {
        let db = get_db().await?;
        seed_seller(&db, "selr1").await?;
        let a = seed_store(&db, "selr1", "Cafe A", 126.97, 37.56).await?;
        let b = seed_store(&db, "selr1", "Cafe B", 126.98, 37.57).await?;
        let svc = MenuService::new(Arc::new(SeaOrmMenuRepository::new(db)));

        svc.save(new_menu("아메리카노", a.id, DEFAULT_MENU_IMAGE)).await?;
        svc.save(new_menu("라떼", a.id, "https://cdn.example.com/menu/store1/latte.png")).await?;
        svc.save(new_menu("케이크", b.id, DEFAULT_MENU_IMAGE)).await?;

        let menus = svc.get_menus_by_store_id(a.id).await?;
        let names: Vec<&str> = menus.iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["아메리카노", "라떼"]);
        assert_eq!(menus[0].image_url, DEFAULT_MENU_IMAGE);
        assert_eq!(menus[1].image_url, "https://cdn.example.com/menu/store1/latte.png");
        assert!(svc.get_menus_by_store_id(999).await?.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn unknown_store_and_bad_price_are_rejected() -> anyhow::Result<()> {
        let db = get_db().await?;
        seed_seller(&db, "selr1").await?;
        let a = seed_store(&db, "selr1", "Cafe A", 126.97, 37.56).await?;
        let svc = MenuService::new(Arc::new(SeaOrmMenuRepository::new(db)));

        assert!(matches!(svc.save(new_menu("x", 999, DEFAULT_MENU_IMAGE)).await, Err(ServiceError::NotFound(_))));
        let mut cheap = new_menu("x", a.id, DEFAULT_MENU_IMAGE);
        cheap.price = -1;
        assert!(matches!(svc.check_new(&cheap), Err(ServiceError::Model(_))));
        assert!(matches!(svc.save(cheap).await, Err(ServiceError::Model(_))));
        assert!(svc.check_new(&new_menu("x", a.id, DEFAULT_MENU_IMAGE)).is_ok());
        Ok(())
    }

    #[tokio::test]
    async fn mock_repository_checks_store() {
        let svc = MenuService::new(Arc::new(MockMenuRepository::with_stores(&[7])));
        assert!(svc.save(new_menu("김밥", 7, DEFAULT_MENU_IMAGE)).await.is_ok());
        assert!(matches!(svc.save(new_menu("김밥", 8, DEFAULT_MENU_IMAGE)).await, Err(ServiceError::NotFound(_))));
        assert_eq!(svc.get_menus_by_store_id(7).await.unwrap().len(), 1);
    }
}
