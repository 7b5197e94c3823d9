use sea_orm::{ColumnTrait, EntityTrait, ModelTrait, QueryFilter};
use anyhow::Result;

use super::setup_test_db;
use crate::{image, menu, seller, store, FoodCategory};
use crate::errors::ModelError;

async fn seed_seller(db: &sea_orm::DatabaseConnection, id: &str) -> Result<seller::Model> {
    Ok(seller::create(db, id, "hash".into(), "홍길동", "123-45-67890", "owner@example.com").await?)
}

fn store_row(name: &str, seller_id: &str, image_id: i32) -> store::NewStoreRow {
    store::NewStoreRow {
        name: name.into(),
        password_hash: "hash".into(),
        conv_x: 126.9780,
        conv_y: 37.5665,
        address: Some("서울 중구".into()),
        category: FoodCategory::Cafe,
        seller_id: seller_id.into(),
        image_id,
    }
}

#[tokio::test]
async fn seller_store_menu_round_trip() -> Result<()> {
    let db = setup_test_db().await?;

    let s = seed_seller(&db, "selr1").await?;
    assert_eq!(s.seller_num, "1234567890");

    let img = image::create(&db, "https://cdn.example.com/store/a.png").await?;
    let st = store::create(&db, store_row("Cafe A", &s.id, img.id)).await?;
    assert_eq!(st.seller_id, "selr1");
    assert_eq!(st.category, FoodCategory::Cafe);

    let menu_img = image::create(&db, "https://cdn.example.com/menu/a.png").await?;
    let m = menu::create(&db, menu::NewMenuRow {
        name: "아메리카노".into(),
        price: 4500,
        description: Some("  ".into()),
        category: FoodCategory::Cafe,
        store_id: st.id,
        image_id: menu_img.id,
    }).await?;
    assert_eq!(m.description, None);

    let owner = st.find_related(seller::Entity).one(&db).await?.expect("owner");
    assert_eq!(owner.id, s.id);

    let menus = st.find_related(menu::Entity).all(&db).await?;
    assert_eq!(menus.len(), 1);
    assert_eq!(menus[0].price, 4500);

    let stores = s.find_related(store::Entity).all(&db).await?;
    assert_eq!(stores.len(), 1);
    Ok(())
}

#[tokio::test]
async fn store_names_are_unique() -> Result<()> {
    let db = setup_test_db().await?;
    let s = seed_seller(&db, "selr1").await?;
    let img = image::create(&db, "https://cdn.example.com/1.png").await?;
    store::create(&db, store_row("Cafe A", &s.id, img.id)).await?;

    let img2 = image::create(&db, "https://cdn.example.com/2.png").await?;
    let dup = store::create(&db, store_row("Cafe A", &s.id, img2.id)).await;
    assert!(matches!(dup, Err(ModelError::Db(_))));

    let count = store::Entity::find().filter(store::Column::Name.eq("Cafe A")).all(&db).await?.len();
    assert_eq!(count, 1);
    Ok(())
}

#[tokio::test]
async fn validation_rejects_bad_input() -> Result<()> {
    let db = setup_test_db().await?;
    let bad_num = seller::create(&db, "selr2", "hash".into(), "kim", "12-34", "a@b.com").await;
    assert!(matches!(bad_num, Err(ModelError::Validation(_))));

    let bad_id = seller::create(&db, "a b", "hash".into(), "kim", "1234567890", "a@b.com").await;
    assert!(matches!(bad_id, Err(ModelError::Validation(_))));

    let s = seed_seller(&db, "selr3").await?;
    let img = image::create(&db, "https://cdn.example.com/x.png").await?;
    let mut row = store_row("Far Away", &s.id, img.id);
    row.conv_y = 91.0;
    assert!(matches!(store::create(&db, row).await, Err(ModelError::Validation(_))));

    assert!(matches!(image::create(&db, " ").await, Err(ModelError::Validation(_))));
    assert!(menu::validate("김밥", -1).is_err());
    Ok(())
}
