//! Route guard: authentication check in front of every protected path.

use actix_web::body::{EitherBody, MessageBody};
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::header;
use actix_web::middleware::Next;
use actix_web::{web, Error, HttpMessage, HttpResponse, ResponseError};
use tracing::{debug, warn};

use crate::auth::token::SESSION_COOKIE;
use crate::error::{AppError, AuthError};
use crate::AppState;

pub const LOGIN_PATH: &str = "/login";

/// Pages reachable without a session (exact match).
const PUBLIC_PATHS: &[&str] = &["/", LOGIN_PATH, "/register", "/forgot-password"];

/// Path prefixes that bypass the guard: auth API, assets, health probe.
const EXEMPT_PREFIXES: &[&str] = &["/api/auth", "/static", "/images", "/favicon.ico", "/health"];

pub fn is_exempt(path: &str) -> bool {
    PUBLIC_PATHS.contains(&path)
        || EXEMPT_PREFIXES.iter().any(|prefix| {
            path.strip_prefix(prefix)
                .map_or(false, |rest| rest.is_empty() || rest.starts_with('/'))
        })
}

/// Lets exempt paths through, verifies the session cookie on everything else.
///
/// Verified claims are stored in the request extensions. Failures redirect
/// page requests to the login page; `/api/` requests get a 401 instead.
pub async fn route_guard<B>(
    req: ServiceRequest,
    next: Next<B>,
) -> Result<ServiceResponse<EitherBody<B>>, Error>
where
    B: MessageBody + 'static,
{
    if is_exempt(req.path()) {
        return Ok(next.call(req).await?.map_into_left_body());
    }

    let verdict = match req.cookie(SESSION_COOKIE) {
        None => Err(AuthError::MissingToken),
        Some(cookie) => match req.app_data::<web::Data<AppState>>() {
            Some(state) => state.auth_service.tokens().verify(cookie.value()),
            None => {
                return Err(AppError::InternalError("application state not configured".into()).into())
            }
        },
    };

    match verdict {
        Ok(claims) => {
            debug!(path = req.path(), user_id = %claims.sub, "Session accepted");
            req.extensions_mut().insert(claims);
            Ok(next.call(req).await?.map_into_left_body())
        }
        Err(reason) => {
            warn!(path = req.path(), %reason, "Rejected unauthenticated request");
            let response = if req.path().starts_with("/api/") {
                AppError::from(reason).error_response()
            } else {
                HttpResponse::Found()
                    .insert_header((header::LOCATION, LOGIN_PATH))
                    .finish()
            };
            Ok(req.into_response(response).map_into_right_body())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_pages_are_exempt() {
        for path in ["/", "/login", "/register", "/forgot-password"] {
            assert!(is_exempt(path), "{} should be public", path);
        }
    }

    #[test]
    fn test_assets_and_auth_api_are_exempt() {
        for path in [
            "/api/auth/login",
            "/api/auth/register",
            "/api/auth/logout",
            "/static/app.css",
            "/images/logo.png",
            "/favicon.ico",
            "/health",
        ] {
            assert!(is_exempt(path), "{} should be exempt", path);
        }
    }

    #[test]
    fn test_everything_else_is_protected() {
        for path in ["/dashboard", "/api/evaluations", "/login/extra", "/registered", "/api"] {
            assert!(!is_exempt(path), "{} should be protected", path);
        }
    }

    #[test]
    fn test_exempt_prefixes_stop_at_segment_boundary() {
        for path in ["/api/authz/users", "/api/authentication", "/healthcheck", "/staticfiles/x", "/favicon.ico.bak"] {
            assert!(!is_exempt(path), "{} should be protected", path);
        }
    }
}
