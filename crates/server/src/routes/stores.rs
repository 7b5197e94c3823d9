//! Store management routes.
//!
//! Every privileged handler re-checks the session: seller role for store
//! routes, seller role plus matching active store for menu routes. A failed
//! check answers with an alert view, not an error status.

use axum::{
    extract::{Multipart, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Redirect, Response},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use models::FoodCategory;
use serde::{Deserialize, Serialize};
use service::{
    errors::ServiceError,
    geo::{GeoPoint, NearbyStore},
    menu::domain::{MenuView, NewMenu},
    store::domain::{NewStore, StoreLogin, StoreView},
    upload::{menu_image_dir, UploadFile, DEFAULT_MENU_IMAGE, DEFAULT_STORE_IMAGE, STORE_IMAGE_DIR},
};
use tracing::{error, info, warn};

use crate::errors::AppError;
use crate::forms::MultipartForm;
use crate::session::{issue_cookie, AuthContext};
use crate::state::ServerState;
use crate::views::{Alert, View};

pub const STORE_PAGE_SIZE: u64 = 8;
pub const LOGIN_FAILED: &str = "로그인 실패";

#[derive(Debug, Deserialize)]
pub struct PageQuery {
    #[serde(default)]
    pub page: u64,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreListModel {
    pub stores: Vec<StoreView>,
    pub total_pages: u64,
    pub current_page: u64,
}

#[derive(Debug, Serialize)]
pub struct CategoriesModel {
    pub categories: Vec<models::food_category::CategoryOption>,
}

#[derive(Debug, Serialize)]
pub struct MenuListModel {
    pub menus: Vec<MenuView>,
    pub categories: Vec<models::food_category::CategoryOption>,
}

/// Uploaded URL when a file was sent, the placeholder otherwise.
async fn image_url(state: &ServerState, file: Option<UploadFile>, dir: &str, default: &str) -> Result<String, AppError> {
    let Some(file) = file else {
        return Ok(default.to_string());
    };
    state.uploader.upload(file, dir).await.map_err(|e| {
        error!(error = %e, %dir, "image upload failed");
        AppError::from(ServiceError::from(e))
    })
}

/// Drops an image stored for a row that was never saved.
async fn discard_image(state: &ServerState, url: &str) {
    if let Err(e) = state.uploader.remove(url).await {
        warn!(error = %e, %url, "orphaned image left in storage");
    }
}

#[utoipa::path(get, path = "/stores", tag = "stores",
    params(("page" = Option<u64>, Query, description = "0-based page")),
    responses((status = 200, description = "store/list view or alert")))]
pub async fn list_stores(
    State(state): State<ServerState>,
    auth: AuthContext,
    Query(q): Query<PageQuery>,
) -> Result<Response, AppError> {
    let Some(user) = auth.seller_user() else {
        return Ok(Alert::not_a_seller().into_response());
    };
    let page = state.stores.get_stores_by_seller_id(&user.seller_id, q.page, STORE_PAGE_SIZE).await?;
    let model = StoreListModel { total_pages: page.total_pages, current_page: page.number, stores: page.content };
    Ok(View::template("store/list", model).into_response())
}

#[utoipa::path(post, path = "/stores/login", tag = "stores",
    request_body = crate::openapi::StoreLoginRequest,
    responses((status = 200, description = "dashboard/{storeId}"), (status = 401, description = "로그인 실패")))]
pub async fn login_store(
    State(state): State<ServerState>,
    auth: AuthContext,
    jar: CookieJar,
    Json(input): Json<StoreLogin>,
) -> Result<Response, AppError> {
    let Some(store) = state.stores.login_store(&input.name, &input.password).await? else {
        return Ok((StatusCode::UNAUTHORIZED, [(header::CONTENT_TYPE, "text/plain; charset=utf-8")], LOGIN_FAILED).into_response());
    };
    let cookie = issue_cookie(&state.session, &auth.with_store(store.id))?;
    Ok((jar.add(cookie), format!("dashboard/{}", store.id)).into_response())
}

#[utoipa::path(get, path = "/stores/form", tag = "stores", responses((status = 200, description = "store/save view or alert")))]
pub async fn store_form(auth: AuthContext) -> Response {
    if !auth.is_seller() {
        return Alert::not_a_seller().into_response();
    }
    View::template("store/save", CategoriesModel { categories: FoodCategory::options() }).into_response()
}

#[utoipa::path(post, path = "/stores", tag = "stores",
    request_body(content = crate::openapi::StoreForm, content_type = "multipart/form-data"),
    responses((status = 303, description = "redirect to /stores"), (status = 200, description = "alert")))]
pub async fn create_store(
    State(state): State<ServerState>,
    auth: AuthContext,
    multipart: Multipart,
) -> Result<Response, AppError> {
    let Some(user) = auth.seller_user().cloned() else {
        return Ok(Alert::not_a_seller().into_response());
    };
    let mut form = MultipartForm::read(multipart, state.max_upload_bytes).await?;
    let input = NewStore {
        name: form.required("name")?.to_string(),
        password: form.required("password")?.to_string(),
        conv_x: form.parse("convX")?,
        conv_y: form.parse("convY")?,
        address: form.text("address").map(str::to_string),
        category: form.category("category")?,
        seller_id: user.seller_id,
        image_url: String::new(),
    };
    state.stores.check_new(&input).await?;
    let file = form.take_file("storeImg");
    let image_url = image_url(&state, file, STORE_IMAGE_DIR, DEFAULT_STORE_IMAGE).await?;
    let saved = match state.stores.save(NewStore { image_url: image_url.clone(), ..input }).await {
        Ok(saved) => saved,
        Err(e) => {
            discard_image(&state, &image_url).await;
            return Err(e.into());
        }
    };
    info!(store_id = saved.id, "store registered from form");
    Ok(Redirect::to("/stores").into_response())
}

#[utoipa::path(get, path = "/stores/{storeId}/menu", tag = "menus",
    params(("storeId" = i32, Path, description = "store id")),
    responses((status = 200, description = "store/manageMenu/list view or alert")))]
pub async fn list_menus(
    State(state): State<ServerState>,
    auth: AuthContext,
    Path(store_id): Path<i32>,
) -> Result<Response, AppError> {
    if !auth.is_seller() {
        return Ok(Alert::not_a_seller().into_response());
    }
    if !auth.manages_store(store_id) {
        warn!(store_id, active = ?auth.store_id, "menu list outside the active store");
        return Ok(Alert::not_your_store(auth.master_name()).into_response());
    }
    let menus = state.menus.get_menus_by_store_id(store_id).await?;
    Ok(View::dashboard("store/manageMenu/list", MenuListModel { menus, categories: FoodCategory::options() }).into_response())
}

#[utoipa::path(post, path = "/stores/{storeId}/menu", tag = "menus",
    params(("storeId" = i32, Path, description = "store id")),
    request_body(content = crate::openapi::MenuForm, content_type = "multipart/form-data"),
    responses((status = 303, description = "redirect to the menu list"), (status = 200, description = "alert")))]
pub async fn create_menu(
    State(state): State<ServerState>,
    auth: AuthContext,
    Path(store_id): Path<i32>,
    multipart: Multipart,
) -> Result<Response, AppError> {
    if !auth.is_seller() {
        return Ok(Alert::not_a_seller().into_response());
    }
    let Some(active) = auth.store_id.filter(|id| *id == store_id) else {
        return Ok(Alert::not_your_store(auth.master_name()).into_response());
    };
    let store = state.stores.find_by_id(active).await?;

    let mut form = MultipartForm::read(multipart, state.max_upload_bytes).await?;
    let input = NewMenu {
        name: form.required("name")?.to_string(),
        price: form.parse("price")?,
        description: form.text("description").map(str::to_string),
        category: form.category("category")?,
        store_id: store.id,
        image_url: String::new(),
    };
    state.menus.check_new(&input)?;
    let file = form.take_file("menuImg");
    let image_url = image_url(&state, file, &menu_image_dir(store.id), DEFAULT_MENU_IMAGE).await?;
    let saved = match state.menus.save(NewMenu { image_url: image_url.clone(), ..input }).await {
        Ok(saved) => saved,
        Err(e) => {
            discard_image(&state, &image_url).await;
            return Err(e.into());
        }
    };
    info!(menu_id = saved.id, store_id = store.id, "menu registered from form");
    Ok(Redirect::to(&format!("/stores/{}/menu", store.id)).into_response())
}

#[derive(Debug, Deserialize)]
pub struct NearbyQuery {
    pub lat: f64,
    pub lon: f64,
    /// metres
    pub radius: f64,
}

#[utoipa::path(get, path = "/stores/nearby", tag = "stores",
    params(
        ("lat" = f64, Query, description = "latitude"),
        ("lon" = f64, Query, description = "longitude"),
        ("radius" = f64, Query, description = "radius in metres"),
    ),
    responses((status = 200, description = "stores within the radius, nearest first"), (status = 400, description = "Bad Request")))]
pub async fn nearby_stores(
    State(state): State<ServerState>,
    Query(q): Query<NearbyQuery>,
) -> Result<Json<Vec<NearbyStore>>, AppError> {
    let center = GeoPoint::new(q.lat, q.lon)?;
    Ok(Json(state.radius.within_radius(center, q.radius).await?))
}
