use actix_web::cookie::{time, Cookie, SameSite};
use actix_web::{web, HttpResponse};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::auth::token::SESSION_COOKIE;
use crate::error::AppError;
use crate::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

pub async fn register(
    req: web::Json<RegisterRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    debug!("Received registration request for email: {}", req.email);

    match state.auth_service.register(&req.name, &req.email, &req.password).await {
        Ok(user) => {
            info!("Registration successful for user: {}", user.id);
            Ok(HttpResponse::Ok().json(user))
        }
        Err(e) => {
            warn!("Registration failed: {}", e);
            Err(e)
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

pub async fn login(
    req: web::Json<LoginRequest>,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    debug!("Received login request for email: {}", req.email);
    match state.auth_service.authenticate(&req.email, &req.password).await {
        Ok(token) => {
            info!("Login successful");
            let max_age = state.auth_service.tokens().ttl().num_seconds();
            let cookie = session_cookie(token, max_age, state.config.is_production());
            Ok(HttpResponse::Ok().cookie(cookie).json(json!({ "success": true })))
        }
        Err(e) => {
            warn!("Login failed: {}", e);
            Err(e)
        }
    }
}

/// Clears the session cookie. Tokens are stateless, so nothing is revoked
/// server side.
pub async fn logout(state: web::Data<AppState>) -> HttpResponse {
    let mut cookie = session_cookie(String::new(), 0, state.config.is_production());
    cookie.make_removal();

    HttpResponse::Ok().cookie(cookie).json(json!({ "success": true }))
}

fn session_cookie(token: String, max_age_secs: i64, secure: bool) -> Cookie<'static> {
    Cookie::build(SESSION_COOKIE, token)
        .path("/")
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Strict)
        .max_age(time::Duration::seconds(max_age_secs))
        .finish()
}
