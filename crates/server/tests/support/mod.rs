#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::body::{to_bytes, Body};
use axum::http::{header, Request, Response, StatusCode};
use axum::Router;
use configs::AppConfig;
use migration::MigratorTrait;
use sea_orm::{ConnectOptions, Database, DatabaseConnection, EntityTrait, PaginatorTrait};
use serde_json::{json, Value};
use service::geo::BoundingBoxRadiusSearch;
use service::seller::BusinessRegistryClient;
use service::upload::{ImageUploader, UploadError, UploadFile};
use tower::ServiceExt;

use server::session::{encode_token, AuthContext, SESSION_COOKIE};
use server::state::ServerState;

pub const SECRET: &str = "test-secret";
pub const BOUNDARY: &str = "----yumyumsFormBoundary";

/// Uploader that records what it was given and hands back a predictable URL.
/// With `unavailable` set every upload is refused like a storage outage.
#[derive(Default)]
pub struct FakeUploader {
    pub unavailable: bool,
    pub uploads: Mutex<Vec<(String, String, usize)>>,
    pub removed: Mutex<Vec<String>>,
}

impl FakeUploader {
    /// URLs uploaded and not removed since.
    pub fn stored(&self) -> Vec<String> {
        let removed = self.removed.lock().unwrap();
        self.uploads
            .lock()
            .unwrap()
            .iter()
            .map(|(dir, name, _)| format!("https://fake.cdn/{dir}/{name}"))
            .filter(|url| !removed.contains(url))
            .collect()
    }
}

#[async_trait::async_trait]
impl ImageUploader for FakeUploader {
    async fn upload(&self, file: UploadFile, dir: &str) -> Result<String, UploadError> {
        if self.unavailable {
            return Err(UploadError::Rejected { status: 503, body: "storage unavailable".into() });
        }
        self.uploads.lock().unwrap().push((dir.to_string(), file.file_name.clone(), file.bytes.len()));
        Ok(format!("https://fake.cdn/{dir}/{}", file.file_name))
    }

    async fn remove(&self, url: &str) -> Result<(), UploadError> {
        if url.starts_with("https://fake.cdn/") {
            self.removed.lock().unwrap().push(url.to_string());
        }
        Ok(())
    }
}

pub struct TestApp {
    pub router: Router,
    pub uploader: Arc<FakeUploader>,
    pub cfg: AppConfig,
    pub db: DatabaseConnection,
}

pub fn test_config() -> AppConfig {
    let mut cfg = AppConfig::default();
    cfg.session.jwt_secret = SECRET.into();
    cfg.business_registry.base_url = "http://127.0.0.1:9/api/fapi".into();
    cfg
}

pub async fn build_app() -> anyhow::Result<TestApp> {
    build_app_with(test_config()).await
}

/// Router over a fresh in-memory SQLite database.
pub async fn build_app_with(cfg: AppConfig) -> anyhow::Result<TestApp> {
    build_app_using(cfg, FakeUploader::default()).await
}

/// App whose object storage refuses every upload.
pub async fn build_app_without_storage() -> anyhow::Result<TestApp> {
    build_app_using(test_config(), FakeUploader { unavailable: true, ..Default::default() }).await
}

pub async fn build_app_using(cfg: AppConfig, uploader: FakeUploader) -> anyhow::Result<TestApp> {
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await?;
    migration::Migrator::up(&db, None).await?;

    let uploader = Arc::new(uploader);
    let radius = Arc::new(BoundingBoxRadiusSearch::new(db.clone()));
    let registry = BusinessRegistryClient::from_config(&cfg.business_registry)?;
    let state = ServerState::new(db.clone(), &cfg, uploader.clone(), radius, registry);
    let router = server::routes::build_router(state, tower_http::cors::CorsLayer::very_permissive());
    Ok(TestApp { router, uploader, cfg, db })
}

impl TestApp {
    pub async fn send(&self, req: Request<Body>) -> anyhow::Result<Response<Body>> {
        Ok(self.router.clone().oneshot(req).await?)
    }

    pub async fn post_json(&self, uri: &str, body: Value, cookie: Option<&str>) -> anyhow::Result<Response<Body>> {
        let mut req = Request::builder().method("POST").uri(uri).header(header::CONTENT_TYPE, "application/json");
        if let Some(c) = cookie {
            req = req.header(header::COOKIE, c);
        }
        self.send(req.body(Body::from(serde_json::to_vec(&body)?))?).await
    }

    pub async fn get(&self, uri: &str, cookie: Option<&str>) -> anyhow::Result<Response<Body>> {
        let mut req = Request::builder().method("GET").uri(uri);
        if let Some(c) = cookie {
            req = req.header(header::COOKIE, c);
        }
        self.send(req.body(Body::empty())?).await
    }

    pub async fn post_form(&self, uri: &str, form: &Form, cookie: Option<&str>) -> anyhow::Result<Response<Body>> {
        let mut req = Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, format!("multipart/form-data; boundary={BOUNDARY}"));
        if let Some(c) = cookie {
            req = req.header(header::COOKIE, c);
        }
        self.send(req.body(Body::from(form.encode()))?).await
    }

    /// Row counts of (store, menu, image).
    pub async fn row_counts(&self) -> anyhow::Result<(u64, u64, u64)> {
        Ok((
            models::store::Entity::find().count(&self.db).await?,
            models::menu::Entity::find().count(&self.db).await?,
            models::image::Entity::find().count(&self.db).await?,
        ))
    }

    /// Register `seller_id` and log in; returns the `session=...` cookie pair.
    pub async fn seller_session(&self, seller_id: &str) -> anyhow::Result<String> {
        let resp = self
            .post_json(
                "/sellers",
                json!({
                    "sellerId": seller_id,
                    "password": "Passw0rd!",
                    "masterName": "홍길동",
                    "sellerNum": "123-45-67890",
                    "email": "owner@example.com"
                }),
                None,
            )
            .await?;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let resp = self
            .post_json("/sellers/login", json!({ "sellerId": seller_id, "password": "Passw0rd!" }), None)
            .await?;
        assert_eq!(resp.status(), StatusCode::OK);
        Ok(session_cookie(&resp).expect("login sets the session cookie"))
    }

    /// Cookie for an arbitrary session context, bypassing login.
    pub fn cookie_for(&self, ctx: &AuthContext) -> String {
        format!("{SESSION_COOKIE}={}", encode_token(&self.cfg.session, ctx).expect("token"))
    }

    pub async fn create_store(&self, cookie: &str, name: &str, lon: f64, lat: f64, image: Option<(&str, &[u8])>) -> anyhow::Result<Response<Body>> {
        let mut form = Form::default()
            .text("name", name)
            .text("password", "1234")
            .text("convX", &lon.to_string())
            .text("convY", &lat.to_string())
            .text("address", "서울 중구")
            .text("category", "CAFE");
        if let Some((file_name, bytes)) = image {
            form = form.file("storeImg", file_name, bytes);
        }
        self.post_form("/stores", &form, Some(cookie)).await
    }

    /// Store login with an existing session; returns the re-issued cookie and the body.
    pub async fn store_login(&self, cookie: &str, name: &str, password: &str) -> anyhow::Result<(StatusCode, Option<String>, String)> {
        let resp = self.post_json("/stores/login", json!({ "name": name, "password": password }), Some(cookie)).await?;
        let status = resp.status();
        let cookie = session_cookie(&resp);
        Ok((status, cookie, body_text(resp).await?))
    }
}

/// `session=...` pair from the response's `Set-Cookie`.
pub fn session_cookie(resp: &Response<Body>) -> Option<String> {
    resp.headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with(&format!("{SESSION_COOKIE}=")))
        .and_then(|v| v.split(';').next())
        .map(str::to_string)
}

pub async fn body_text(resp: Response<Body>) -> anyhow::Result<String> {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await?;
    Ok(String::from_utf8(bytes.to_vec())?)
}

pub async fn body_json(resp: Response<Body>) -> anyhow::Result<Value> {
    Ok(serde_json::from_str(&body_text(resp).await?)?)
}

pub fn location(resp: &Response<Body>) -> Option<&str> {
    resp.headers().get(header::LOCATION).and_then(|v| v.to_str().ok())
}

/// Hand-built `multipart/form-data` body.
#[derive(Default)]
pub struct Form {
    parts: Vec<u8>,
}

impl Form {
    pub fn text(mut self, name: &str, value: &str) -> Self {
        self.parts.extend_from_slice(
            format!("--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n").as_bytes(),
        );
        self
    }

    pub fn file(mut self, name: &str, file_name: &str, bytes: &[u8]) -> Self {
        self.parts.extend_from_slice(
            format!(
                "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"\r\nContent-Type: image/png\r\n\r\n"
            )
            .as_bytes(),
        );
        self.parts.extend_from_slice(bytes);
        self.parts.extend_from_slice(b"\r\n");
        self
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut body = self.parts.clone();
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());
        body
    }
}
