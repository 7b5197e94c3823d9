pub mod sellers;
pub mod stores;

use axum::{
    extract::{DefaultBodyLimit, State},
    routing::{get, post},
    Json, Router,
};
use common::types::Health;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;
use utoipa::OpenApi;

use crate::openapi::ApiDoc;
use crate::state::ServerState;

/// Multipart framing allowance on top of the per-file limit.
const FORM_OVERHEAD_BYTES: usize = 1024 * 1024;

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health(State(state): State<ServerState>) -> Json<Health> {
    Json(Health::from_db_reachable(state.db.ping().await.is_ok()))
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Build the full application router.
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let body_limit = state.max_upload_bytes.saturating_add(FORM_OVERHEAD_BYTES);

    let public = Router::new()
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .route("/stores/nearby", get(stores::nearby_stores));

    let sellers = Router::new()
        .route("/sellers", post(sellers::register))
        .route("/sellers/login", post(sellers::login))
        .route("/sellers/logout", post(sellers::logout))
        .route("/sellers/verify", get(sellers::verify_business));

    let stores = Router::new()
        .route("/stores", get(stores::list_stores).post(stores::create_store))
        .route("/stores/login", post(stores::login_store))
        .route("/stores/form", get(stores::store_form))
        .route("/stores/:store_id/menu", get(stores::list_menus).post(stores::create_menu))
        .layer(DefaultBodyLimit::max(body_limit));

    public
        .merge(sellers)
        .merge(stores)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
