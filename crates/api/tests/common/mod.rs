//! Shared harness for the HTTP-level integration tests.
//!
//! Every test drives the real router from [`build_app_router`] with
//! `tower::ServiceExt::oneshot`. The clinic backend is replaced by a small
//! axum server on an ephemeral port, built per test from the routes it needs.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE};
use axum::http::{Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde_json::{json, Value};
use tower::ServiceExt;
use url::Url;

use clinic_api::auth::jwt::JwtConfig;
use clinic_api::backend::{BackendClient, EndpointRegistry};
use clinic_api::config::{BackendConfig, ServerConfig};
use clinic_api::router::build_app_router;
use clinic_api::state::AppState;

pub const TEST_ACCESS_KEY: &str = "integration-test-access-key";

/// Build a test `ServerConfig` pointing at `api_host`.
///
/// Uses `http://localhost:5173` as CORS origin (matching the dev default),
/// a 30-second request timeout and a non-secure session cookie.
pub fn test_config(api_host: Url) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        cookie_secure: false,
        jwt: JwtConfig {
            access_key: TEST_ACCESS_KEY.to_string(),
        },
        backend: BackendConfig { api_host },
    }
}

/// Build the full application router against the backend at `api_host`.
pub fn build_test_app(api_host: Url) -> Router {
    let config = test_config(api_host);
    let endpoints = EndpointRegistry::new(config.backend.api_host.clone());
    let backend = BackendClient::new(endpoints, std::time::Duration::from_secs(5))
        .expect("client should build");
    let state = AppState::new(config.clone(), backend);
    build_app_router(state, &config)
}

/// Serve `routes` as the fake clinic backend and return its base URL.
pub async fn spawn_backend(routes: Router) -> Url {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind should succeed");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, routes).await.ok();
    });
    Url::parse(&format!("http://{addr}/")).expect("valid url")
}

/// A base URL nothing listens on.
pub fn unreachable_backend() -> Url {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind should succeed");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    Url::parse(&format!("http://{addr}/")).expect("valid url")
}

/// Backend envelope around a successful payload.
pub fn envelope(body: Value) -> Value {
    json!({ "status": 200, "body": body })
}

/// Sign an access token the way the backend does.
pub fn mint_token(user_id: i64, roles: &[&str]) -> String {
    let now = chrono::Utc::now().timestamp();
    let claims = json!({
        "sub": format!("user{user_id}@clinic.vn"),
        "jti": format!("jti-{user_id}"),
        "userId": user_id.to_string(),
        "role": roles,
        "iat": now,
        "nbf": now - 5,
        "exp": now + 3600,
    });
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(TEST_ACCESS_KEY.as_bytes()),
    )
    .expect("encoding should succeed")
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    let request = Request::get(uri).body(Body::empty()).unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn get_with_cookie(app: Router, uri: &str, token: &str) -> Response<Body> {
    let request = Request::get(uri)
        .header(COOKIE, format!("access-token={token}"))
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response<Body> {
    let request = Request::post(uri)
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json_with_cookie(
    app: Router,
    uri: &str,
    token: &str,
    body: Value,
) -> Response<Body> {
    let request = Request::post(uri)
        .header(CONTENT_TYPE, "application/json")
        .header(COOKIE, format!("access-token={token}"))
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Value of the `Location` header.
pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get("location")
        .expect("missing Location header")
        .to_str()
        .unwrap()
}
