//! Signed session cookie.
//!
//! The session is an HS256 JWT in the `session` cookie. Handlers never read
//! the cookie themselves; they take an [`AuthContext`] argument, which is
//! anonymous when the cookie is missing, expired or forged.

use axum::{async_trait, extract::FromRequestParts, http::request::Parts};
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use configs::SessionConfig;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::AppError;
use crate::state::ServerState;

pub const SESSION_COOKIE: &str = "session";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoginType {
    #[serde(rename = "s")]
    Seller,
    #[serde(rename = "m")]
    Member,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginUser {
    pub seller_id: String,
    pub master_name: String,
}

#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    login_type: Option<LoginType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    seller_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    master_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    store_id: Option<i32>,
    exp: usize,
}

/// Who is calling, as recorded in the session cookie.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AuthContext {
    pub login_type: Option<LoginType>,
    pub login_user: Option<LoginUser>,
    /// Active store, set by store login
    pub store_id: Option<i32>,
}

impl AuthContext {
    pub fn seller(seller_id: &str, master_name: &str) -> Self {
        Self {
            login_type: Some(LoginType::Seller),
            login_user: Some(LoginUser { seller_id: seller_id.to_string(), master_name: master_name.to_string() }),
            store_id: None,
        }
    }

    pub fn is_seller(&self) -> bool {
        self.login_type == Some(LoginType::Seller)
    }

    /// The logged-in seller, if this is a seller session.
    pub fn seller_user(&self) -> Option<&LoginUser> {
        if self.is_seller() { self.login_user.as_ref() } else { None }
    }

    /// Seller session whose active store is `store_id`.
    pub fn manages_store(&self, store_id: i32) -> bool {
        self.is_seller() && self.store_id == Some(store_id)
    }

    pub fn with_store(mut self, store_id: i32) -> Self {
        self.store_id = Some(store_id);
        self
    }

    pub fn master_name(&self) -> &str {
        self.login_user.as_ref().map(|u| u.master_name.as_str()).unwrap_or_default()
    }
}

pub fn encode_token(cfg: &SessionConfig, ctx: &AuthContext) -> Result<String, AppError> {
    let exp = (chrono::Utc::now() + chrono::Duration::hours(cfg.ttl_hours)).timestamp().max(0) as usize;
    let claims = SessionClaims {
        login_type: ctx.login_type,
        seller_id: ctx.login_user.as_ref().map(|u| u.seller_id.clone()),
        master_name: ctx.login_user.as_ref().map(|u| u.master_name.clone()),
        store_id: ctx.store_id,
        exp,
    };
    encode(&Header::new(Algorithm::HS256), &claims, &EncodingKey::from_secret(cfg.jwt_secret.as_bytes()))
        .map_err(|e| AppError::Internal(format!("session token: {e}")))
}

pub fn decode_token(cfg: &SessionConfig, token: &str) -> Option<AuthContext> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    let data = decode::<SessionClaims>(token, &DecodingKey::from_secret(cfg.jwt_secret.as_bytes()), &validation)
        .map_err(|e| warn!(error = %e, "session cookie rejected"))
        .ok()?;
    let c = data.claims;
    let login_user = match (c.seller_id, c.master_name) {
        (Some(seller_id), Some(master_name)) => Some(LoginUser { seller_id, master_name }),
        _ => None,
    };
    Some(AuthContext { login_type: c.login_type, login_user, store_id: c.store_id })
}

/// Cookie carrying `ctx`, replacing any previous session.
pub fn issue_cookie(cfg: &SessionConfig, ctx: &AuthContext) -> Result<Cookie<'static>, AppError> {
    let mut cookie = Cookie::new(SESSION_COOKIE, encode_token(cfg, ctx)?);
    cookie.set_path("/");
    cookie.set_http_only(true);
    cookie.set_secure(cfg.cookie_secure);
    cookie.set_same_site(SameSite::Lax);
    Ok(cookie)
}

pub fn clear_cookie(jar: CookieJar) -> CookieJar {
    jar.remove(Cookie::build(SESSION_COOKIE).path("/"))
}

#[async_trait]
impl FromRequestParts<ServerState> for AuthContext {
    type Rejection = std::convert::Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &ServerState) -> Result<Self, Self::Rejection> {
        let jar = CookieJar::from_headers(&parts.headers);
        Ok(jar
            .get(SESSION_COOKIE)
            .and_then(|c| decode_token(&state.session, c.value()))
            .unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> SessionConfig {
        SessionConfig { jwt_secret: "test-secret".into(), ttl_hours: 1, cookie_secure: false }
    }

    #[test]
    fn token_round_trips_the_context() {
        let ctx = AuthContext::seller("selr1", "홍길동").with_store(3);
        let token = encode_token(&cfg(), &ctx).unwrap();
        assert_eq!(decode_token(&cfg(), &token), Some(ctx));
    }

    #[test]
    fn foreign_or_expired_tokens_are_ignored() {
        let ctx = AuthContext::seller("selr1", "홍길동");
        let mut other = cfg();
        other.jwt_secret = "other".into();
        let forged = encode_token(&other, &ctx).unwrap();
        assert_eq!(decode_token(&cfg(), &forged), None);

        let mut stale = cfg();
        stale.ttl_hours = -2;
        let expired = encode_token(&stale, &ctx).unwrap();
        assert_eq!(decode_token(&cfg(), &expired), None);
    }

    #[test]
    fn store_management_needs_seller_and_active_store() {
        let seller = AuthContext::seller("selr1", "홍길동");
        assert!(!seller.manages_store(1));
        assert!(seller.clone().with_store(1).manages_store(1));
        assert!(!seller.with_store(2).manages_store(1));

        let member = AuthContext { login_type: Some(LoginType::Member), login_user: None, store_id: Some(1) };
        assert!(!member.manages_store(1));
        assert!(member.seller_user().is_none());
    }
}
