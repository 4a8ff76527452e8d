#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use assets_api::app::build_router;
use assets_api::auth::jwt::{generate_access_token, JwtConfig};
use assets_api::config::{OpenApiConfig, ServerConfig};
use assets_api::state::AppState;
use assets_core::permissions::Permission;
use assets_store::AssetStore;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        jwt: JwtConfig {
            secret: "integration-test-secret-with-enough-entropy".to_string(),
            access_token_expiry_mins: 15,
        },
        openapi: OpenApiConfig::default(),
    }
}

/// Build the full application router with all middleware layers and an
/// empty store.
pub fn build_test_app() -> Router {
    build_test_app_with_store(Arc::new(AssetStore::new()))
}

pub fn build_test_app_with_store(store: Arc<AssetStore>) -> Router {
    build_router(AppState {
        store,
        config: Arc::new(test_config()),
    })
}

/// Issue a token for `tester` holding `permissions`.
pub fn token(permissions: &[Permission]) -> String {
    generate_access_token("tester", "tester@example.com", permissions, &test_config().jwt)
        .expect("token generation should succeed")
}

/// A token holding every permission.
pub fn admin_token() -> String {
    token(&[Permission::ReadAsset, Permission::CreateAsset])
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<&str>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    app.clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap()
}

pub async fn get(app: &Router, uri: &str, token: Option<&str>) -> Response<Body> {
    send(app, Method::GET, uri, token, None).await
}

pub async fn post_json(app: &Router, uri: &str, token: Option<&str>, body: &str) -> Response<Body> {
    send(app, Method::POST, uri, token, Some(body)).await
}

pub async fn put_json(app: &Router, uri: &str, token: Option<&str>, body: &str) -> Response<Body> {
    send(app, Method::PUT, uri, token, Some(body)).await
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    String::from_utf8(body_bytes(response).await).unwrap()
}
