//! View models returned in place of server-rendered pages.
//!
//! A page is `{"view", "viewPath", "model"}`; an alert is
//! `{"view": "inc/alert", "message", "url"}` and is always sent with 200.

use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

pub const ALERT_VIEW: &str = "inc/alert";
pub const TEMPLATE: &str = "template";
pub const DASHBOARD_TEMPLATE: &str = "dashBoardTemplate";

pub const NOT_A_SELLER: &str = "판매자 계정이 아닙니다.";

#[derive(Debug, Serialize)]
pub struct Alert {
    view: &'static str,
    pub message: String,
    pub url: String,
}

impl Alert {
    pub fn new(message: impl Into<String>, url: impl Into<String>) -> Self {
        Self { view: ALERT_VIEW, message: message.into(), url: url.into() }
    }

    pub fn not_a_seller() -> Self {
        Self::new(NOT_A_SELLER, "/")
    }

    /// The seller is logged in but `store_id` is not their active store.
    pub fn not_your_store(master_name: &str) -> Self {
        Self::new(format!("{master_name}님의 매장이 아닙니다."), "/stores")
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct View<M: Serialize> {
    view: &'static str,
    view_path: &'static str,
    model: M,
}

impl<M: Serialize> View<M> {
    pub fn template(view_path: &'static str, model: M) -> Self {
        Self { view: TEMPLATE, view_path, model }
    }

    pub fn dashboard(view_path: &'static str, model: M) -> Self {
        Self { view: DASHBOARD_TEMPLATE, view_path, model }
    }
}

impl<M: Serialize> IntoResponse for View<M> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
