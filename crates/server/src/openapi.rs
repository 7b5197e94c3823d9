//! OpenAPI document served at `/api-docs/openapi.json`.

use serde::Serialize;
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String, pub database: String }

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SellerRegisterRequest {
    pub seller_id: String,
    pub password: String,
    pub master_name: String,
    pub seller_num: String,
    pub email: String,
}

#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SellerLoginRequest { pub seller_id: String, pub password: String }

#[derive(ToSchema)]
pub struct StoreLoginRequest { pub name: String, pub password: String }

/// `multipart/form-data` body of `POST /stores`
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct StoreForm {
    pub name: String,
    pub password: String,
    pub conv_x: f64,
    pub conv_y: f64,
    pub address: Option<String>,
    /// FoodCategory code, e.g. `CAFE`
    pub category: String,
    #[schema(value_type = Option<String>, format = Binary)]
    pub store_img: Option<Vec<u8>>,
}

/// `multipart/form-data` body of `POST /stores/{storeId}/menu`
#[derive(Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct MenuForm {
    pub name: String,
    pub price: i32,
    pub description: Option<String>,
    pub category: String,
    #[schema(value_type = Option<String>, format = Binary)]
    pub menu_img: Option<Vec<u8>>,
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::sellers::register,
        crate::routes::sellers::login,
        crate::routes::sellers::logout,
        crate::routes::sellers::verify_business,
        crate::routes::stores::list_stores,
        crate::routes::stores::login_store,
        crate::routes::stores::store_form,
        crate::routes::stores::create_store,
        crate::routes::stores::list_menus,
        crate::routes::stores::create_menu,
        crate::routes::stores::nearby_stores,
    ),
    components(schemas(
        HealthResponse,
        SellerRegisterRequest,
        SellerLoginRequest,
        StoreLoginRequest,
        StoreForm,
        MenuForm,
    )),
    tags(
        (name = "health"),
        (name = "sellers", description = "Seller accounts and session"),
        (name = "stores", description = "Store registration and listing"),
        (name = "menus", description = "Menus of the active store"),
    )
)]
pub struct ApiDoc;
