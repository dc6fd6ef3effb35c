#![allow(dead_code, unused_macros, unused_imports)]

use actix_web::body::MessageBody;
use actix_web::cookie::Cookie;
use actix_web::dev::ServiceResponse;
use actix_web::web;
use imobiai_server::config::{
    AuthConfig, CompletionConfig, CorsConfig, DatabaseConfig, ServerConfig, Settings,
};
use imobiai_server::{AppState, MemoryStore};
use serde_json::json;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

pub const JWT_SECRET: &str = "integration_test_secret";
pub const API_KEY: &str = "pplx-integration";
pub const APPRAISAL: &str = "Estimativa: R$ 420.000 a R$ 470.000. Bom potencial de valorização.";

pub fn settings(completion_url: &str) -> Settings {
    Settings {
        environment: "test".into(),
        server: ServerConfig {
            host: "127.0.0.1".into(),
            port: 0,
            workers: 1,
        },
        database: DatabaseConfig {
            url: "memory://".into(),
            max_connections: 1,
            acquire_timeout_secs: 1,
            run_migrations: false,
        },
        auth: AuthConfig {
            jwt_secret: JWT_SECRET.into(),
            token_expiry_hours: 24,
            bcrypt_cost: 4,
        },
        completion: CompletionConfig {
            api_url: completion_url.into(),
            api_key: API_KEY.into(),
            model: "mixtral-8x7b-instruct".into(),
            timeout_secs: 5,
        },
        cors: CorsConfig {
            enabled: false,
            allow_any_origin: false,
            allowed_origins: Vec::new(),
            max_age: 0,
        },
    }
}

/// State backed by a fresh in-memory store; the store handle is returned for
/// assertions.
pub fn state(completion_url: &str) -> (web::Data<AppState>, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let state = AppState::with_store(settings(completion_url), store.clone())
        .expect("Failed to build app state");
    (web::Data::new(state), store)
}

/// Completion API double answering every chat request with [`APPRAISAL`].
pub async fn completion_server() -> MockServer {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "cmpl-1",
            "model": "mixtral-8x7b-instruct",
            "choices": [{
                "index": 0,
                "message": { "role": "assistant", "content": APPRAISAL }
            }]
        })))
        .mount(&server)
        .await;
    server
}

pub fn completion_url(server: &MockServer) -> String {
    format!("{}/chat/completions", server.uri())
}

pub fn session_cookie<B: MessageBody>(resp: &ServiceResponse<B>) -> Option<Cookie<'static>> {
    resp.response()
        .cookies()
        .find(|c| c.name() == "token")
        .map(|c| c.into_owned())
}

/// Registers a user through the API and returns the response.
macro_rules! register {
    ($app:expr, $name:expr, $email:expr, $password:expr) => {
        actix_web::test::TestRequest::post()
            .uri("/api/auth/register")
            .set_json(serde_json::json!({
                "name": $name,
                "email": $email,
                "password": $password
            }))
            .send_request(&$app)
            .await
    };
}

macro_rules! login {
    ($app:expr, $email:expr, $password:expr) => {
        actix_web::test::TestRequest::post()
            .uri("/api/auth/login")
            .set_json(serde_json::json!({
                "email": $email,
                "password": $password
            }))
            .send_request(&$app)
            .await
    };
}

pub(crate) use {login, register};
