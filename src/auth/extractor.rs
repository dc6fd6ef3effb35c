use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};
use uuid::Uuid;

use crate::auth::token::{Claims, SESSION_COOKIE};
use crate::error::{AppError, AuthError};
use crate::AppState;

/// Identity of the caller, taken from a verified session cookie.
///
/// Reuses the claims the route guard already verified when present,
/// otherwise verifies the cookie itself.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
    pub role: String,
}

impl AuthenticatedUser {
    fn from_claims(claims: &Claims) -> Result<Self, AuthError> {
        Ok(Self {
            user_id: claims.user_id()?,
            email: claims.email.clone(),
            role: claims.role.clone(),
        })
    }

    fn extract(req: &HttpRequest) -> Result<Self, AppError> {
        if let Some(claims) = req.extensions().get::<Claims>() {
            return Ok(Self::from_claims(claims)?);
        }

        let cookie = req.cookie(SESSION_COOKIE).ok_or(AuthError::MissingToken)?;
        let state = req
            .app_data::<web::Data<AppState>>()
            .ok_or_else(|| AppError::InternalError("application state not configured".into()))?;

        let claims = state.auth_service.tokens().verify(cookie.value())?;
        Ok(Self::from_claims(&claims)?)
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        ready(Self::extract(req))
    }
}
