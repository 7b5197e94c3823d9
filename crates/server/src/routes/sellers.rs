use axum::{
    extract::{Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use service::seller::domain::{NewSeller, Seller, SellerLogin};

use crate::errors::AppError;
use crate::session::{clear_cookie, issue_cookie, AuthContext};
use crate::state::ServerState;

#[utoipa::path(post, path = "/sellers", tag = "sellers",
    request_body = crate::openapi::SellerRegisterRequest,
    responses((status = 201, description = "Registered"), (status = 400, description = "Bad Request"), (status = 409, description = "Conflict")))]
pub async fn register(
    State(state): State<ServerState>,
    Json(input): Json<NewSeller>,
) -> Result<(StatusCode, Json<Seller>), AppError> {
    let seller = state.sellers.save(input).await?;
    Ok((StatusCode::CREATED, Json(seller)))
}

#[utoipa::path(post, path = "/sellers/login", tag = "sellers",
    request_body = crate::openapi::SellerLoginRequest,
    responses((status = 200, description = "Logged in, session cookie set"), (status = 401, description = "Unauthorized")))]
pub async fn login(
    State(state): State<ServerState>,
    jar: CookieJar,
    Json(input): Json<SellerLogin>,
) -> Result<(CookieJar, Json<Seller>), AppError> {
    let seller = state.sellers.login(input).await?;
    let cookie = issue_cookie(&state.session, &AuthContext::seller(&seller.seller_id, &seller.master_name))?;
    Ok((jar.add(cookie), Json(seller)))
}

#[utoipa::path(post, path = "/sellers/logout", tag = "sellers", responses((status = 204, description = "Session cleared")))]
pub async fn logout(jar: CookieJar) -> (CookieJar, StatusCode) {
    (clear_cookie(jar), StatusCode::NO_CONTENT)
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerifyQuery {
    pub master_name: String,
    pub seller_num: String,
}

/// Business registry response, passed through as-is.
#[utoipa::path(get, path = "/sellers/verify", tag = "sellers",
    params(
        ("masterName" = String, Query, description = "owner name"),
        ("sellerNum" = String, Query, description = "business registration number"),
    ),
    responses((status = 200, description = "Raw registry response"), (status = 502, description = "Registry unavailable")))]
pub async fn verify_business(
    State(state): State<ServerState>,
    Query(q): Query<VerifyQuery>,
) -> Result<Response, AppError> {
    let body = state.sellers.verify_business(&q.master_name, &q.seller_num).await?;
    Ok(([(header::CONTENT_TYPE, "application/json")], body).into_response())
}
