#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use bookswap::bookswap_config::JwtConfig;
use bookswap::router::init_router;
use bookswap::state::AppState;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

pub const TEST_JWT_SECRET: &str = "integration-test-secret-key-32-characters";

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig::new(TEST_JWT_SECRET)
}

/// Router over a fresh in-memory store. Clones of the router share that store.
pub fn setup_test_app() -> Router {
    init_router(AppState::in_memory(test_jwt_config()))
}

/// Sends `request` and returns the status with the JSON body (`Null` when empty).
pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(|_| {
            Value::String(String::from_utf8_lossy(&bytes).into_owned())
        })
    };
    (status, body)
}

pub fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

pub fn bearer_request(method: &str, uri: &str, token: &str, body: Option<Value>) -> Request<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token));
    match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_string(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub fn login_request(username: &str, password: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/auth/login")
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(format!(
            "grant_type=password&username={}&password={}",
            username, password
        )))
        .unwrap()
}

pub async fn register(app: &Router, username: &str, password: &str) -> Value {
    let (status, body) = send(
        app,
        json_request(
            "POST",
            "/auth/register",
            serde_json::json!({ "username": username, "password": password }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {}", body);
    body
}

pub async fn login(app: &Router, username: &str, password: &str) -> String {
    let (status, body) = send(app, login_request(username, password)).await;
    assert_eq!(status, StatusCode::OK, "login failed: {}", body);
    body["access_token"].as_str().unwrap().to_string()
}

/// Creates a user through `/users/` and returns its id.
pub async fn create_user(app: &Router, username: &str) -> i64 {
    let (status, body) = send(
        app,
        json_request(
            "POST",
            "/users/",
            serde_json::json!({ "username": username, "password": "pw" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create user failed: {}", body);
    body["id"].as_i64().unwrap()
}

pub async fn create_book(app: &Router, title: &str, owner_id: i64) -> i64 {
    let (status, body) = send(
        app,
        json_request(
            "POST",
            "/books/",
            serde_json::json!({ "title": title, "owner_id": owner_id }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create book failed: {}", body);
    body["id"].as_i64().unwrap()
}

pub async fn create_tag(app: &Router, name: &str) -> i64 {
    let (status, body) = send(
        app,
        json_request("POST", "/tags/", serde_json::json!({ "name": name })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "create tag failed: {}", body);
    body["id"].as_i64().unwrap()
}
